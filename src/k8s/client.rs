use crate::k8s::config::{resolve_config, ConfigSource};
use crate::k8s::types::GameServerAllocation;
use crate::{AllocatorError, Result};
use kube::{Api, Client};
use tracing::{debug, info};

#[derive(Clone)]
pub struct K8sClient {
    client: Client,
}

impl K8sClient {
    pub async fn from_source(source: &ConfigSource) -> Result<Self> {
        debug!("Initializing Kubernetes client");

        let config = resolve_config(source).await?;
        let cluster_url = config.cluster_url.clone();

        let client = Client::try_from(config).map_err(|e| {
            AllocatorError::KubernetesError(format!("Failed to create K8s client: {}", e))
        })?;

        info!("Kubernetes client ready for {} ({})", cluster_url, source);

        Ok(Self { client })
    }

    pub fn game_server_allocations(&self, namespace: &str) -> Api<GameServerAllocation> {
        Api::namespaced(self.client.clone(), namespace)
    }
}
