pub mod endpoints;

use crate::k8s::{
    AllocationState, GameServerAllocation, GameServerAllocationSpec, K8sClient, FLEET_NAME_LABEL,
};
use crate::{AllocatorError, Result};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::api::PostParams;
use kube::Api;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub use endpoints::{AllocationResult, EndpointPair, Protocol};

/// Namespace and fleet every request allocates from. Fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetTarget {
    pub namespace: String,
    pub fleet: String,
}

impl FleetTarget {
    pub fn new(namespace: impl Into<String>, fleet: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            fleet: fleet.into(),
        }
    }
}

#[async_trait]
pub trait Allocator: Send + Sync {
    async fn allocate(&self, request: GameServerAllocation) -> Result<GameServerAllocation>;
}

/// Builds an allocation request that selects any ready game server of `fleet`.
pub fn allocation_request(fleet: &str) -> GameServerAllocation {
    let match_labels = BTreeMap::from([(FLEET_NAME_LABEL.to_string(), fleet.to_string())]);

    GameServerAllocation {
        metadata: Default::default(),
        spec: GameServerAllocationSpec {
            required: Some(LabelSelector {
                match_labels: Some(match_labels),
                ..Default::default()
            }),
        },
        status: None,
    }
}

/// Allocates through the Kubernetes API by creating `GameServerAllocation`
/// objects in one namespace.
pub struct KubeAllocator {
    api: Api<GameServerAllocation>,
    namespace: String,
}

impl KubeAllocator {
    pub fn new(client: &K8sClient, namespace: &str) -> Self {
        Self {
            api: client.game_server_allocations(namespace),
            namespace: namespace.to_string(),
        }
    }
}

#[async_trait]
impl Allocator for KubeAllocator {
    async fn allocate(&self, request: GameServerAllocation) -> Result<GameServerAllocation> {
        debug!("Creating GameServerAllocation in {}", self.namespace);

        let gsa = self
            .api
            .create(&PostParams::default(), &request)
            .await
            .map_err(|e| {
                AllocatorError::AllocationFailed(format!(
                    "create GameServerAllocation in {}: {}",
                    self.namespace, e
                ))
            })?;

        match gsa.status.as_ref().and_then(|s| s.state.as_ref()) {
            Some(AllocationState::Allocated) => {}
            Some(state) => warn!(
                "GameServerAllocation in {} finished in state {}",
                self.namespace, state
            ),
            None => warn!(
                "GameServerAllocation in {} returned without a state",
                self.namespace
            ),
        }

        Ok(gsa)
    }
}
