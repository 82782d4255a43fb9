//! Agones `GameServerAllocation` resource (`allocation.agones.dev/v1`).
//!
//! Only the fields this service reads or writes are modelled. The CRD itself
//! is installed and owned by Agones, so no schema is generated here.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Label Agones puts on every game server belonging to a fleet.
pub const FLEET_NAME_LABEL: &str = "agones.dev/fleet";

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize)]
#[kube(
    group = "allocation.agones.dev",
    version = "v1",
    kind = "GameServerAllocation",
    namespaced,
    status = "GameServerAllocationStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct GameServerAllocationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<LabelSelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameServerAllocationStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<AllocationState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_server_name: Option<String>,

    #[serde(default)]
    pub ports: Vec<GameServerStatusPort>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameServerStatusPort {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub port: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationState {
    Allocated,
    UnAllocated,
    Contention,
    #[serde(other)]
    Unknown,
}

impl AllocationState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AllocationState::Allocated => "Allocated",
            AllocationState::UnAllocated => "UnAllocated",
            AllocationState::Contention => "Contention",
            AllocationState::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for AllocationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
