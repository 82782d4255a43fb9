pub mod client;
pub mod config;
pub mod types;

pub use client::K8sClient;
pub use config::{default_kubeconfig_path, resolve_config, ConfigSource};
pub use types::{
    AllocationState, GameServerAllocation, GameServerAllocationSpec, GameServerAllocationStatus,
    GameServerStatusPort, FLEET_NAME_LABEL,
};
