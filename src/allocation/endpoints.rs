use crate::k8s::{GameServerAllocation, GameServerAllocationStatus};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    /// Maps an Agones port name onto a transport. Names are matched exactly.
    pub fn from_port_name(name: &str) -> Option<Self> {
        match name {
            "tcp" => Some(Protocol::Tcp),
            "udp" => Some(Protocol::Udp),
            _ => None,
        }
    }
}

/// One connectable endpoint per transport, rendered as `host:port`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointPair {
    #[serde(serialize_with = "empty_if_none")]
    pub tcp: Option<String>,

    #[serde(serialize_with = "empty_if_none")]
    pub udp: Option<String>,
}

impl EndpointPair {
    /// Builds the pair from an allocation status.
    ///
    /// Every port shares the status's single address. Ports are scanned in
    /// order and each one overwrites whatever was recorded for its protocol,
    /// so when a name repeats the last entry is the one reported.
    pub fn from_status(status: &GameServerAllocationStatus) -> Self {
        let address = status.address.as_deref().unwrap_or_default();

        let mut endpoints: HashMap<Protocol, String> = HashMap::new();
        for port in &status.ports {
            if let Some(protocol) = Protocol::from_port_name(&port.name) {
                endpoints.insert(protocol, format!("{}:{}", address, port.port));
            }
        }

        Self {
            tcp: endpoints.remove(&Protocol::Tcp),
            udp: endpoints.remove(&Protocol::Udp),
        }
    }
}

fn empty_if_none<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}

/// What the caller gets back for one allocated game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    pub name: String,
    pub addresses: EndpointPair,
}

impl AllocationResult {
    pub fn from_allocation(gsa: &GameServerAllocation) -> Self {
        let status = gsa.status.as_ref();

        let name = gsa
            .metadata
            .name
            .clone()
            .or_else(|| status.and_then(|s| s.game_server_name.clone()))
            .unwrap_or_default();

        let addresses = status.map(EndpointPair::from_status).unwrap_or_default();

        Self { name, addresses }
    }
}
