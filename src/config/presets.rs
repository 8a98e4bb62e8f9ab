//! Built-in node presets matching the original three-node deployment.
//!
//! ```text
//! API1  VM1  :8080  → API2 localhost:8081, API3 192.168.122.110:8083
//! API2  VM1  :8081  → API1 $ENV_HOST:8080, API3 $ENV_HOST:8083
//! API3  VM2  :8083  → API1 192.168.122.159:8080, API2 192.168.122.159:8081
//! ```

use std::str::FromStr;

use crate::config::schema::{ListenerConfig, MeshConfig, NodeConfig, PeerConfig};

/// Environment variable API2 reads its peers' host from.
pub const ENV_HOST: &str = "ENV_HOST";

/// One of the three known nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePreset {
    Api1,
    Api2,
    Api3,
}

impl FromStr for NodePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api1" => Ok(NodePreset::Api1),
            "api2" => Ok(NodePreset::Api2),
            "api3" => Ok(NodePreset::Api3),
            other => Err(format!("unknown node preset '{}' (expected api1, api2 or api3)", other)),
        }
    }
}

impl NodePreset {
    /// Build the full configuration for this node.
    pub fn config(self) -> MeshConfig {
        let (node, port, peers) = match self {
            NodePreset::Api1 => (
                node("API1", "1"),
                8080,
                vec![
                    peer("API2", "1", "localhost:8081", None),
                    peer("API3", "2", "192.168.122.110:8083", None),
                ],
            ),
            NodePreset::Api2 => (
                node("API2", "1"),
                8081,
                vec![
                    peer("API1", "1", "localhost:8080", Some(ENV_HOST)),
                    peer("API3", "2", "localhost:8083", Some(ENV_HOST)),
                ],
            ),
            NodePreset::Api3 => (
                node("API3", "2"),
                8083,
                vec![
                    peer("API1", "1", "192.168.122.159:8080", None),
                    peer("API2", "1", "192.168.122.159:8081", None),
                ],
            ),
        };

        MeshConfig {
            node,
            listener: ListenerConfig {
                bind_address: format!("0.0.0.0:{}", port),
            },
            peers,
            ..MeshConfig::default()
        }
    }
}

fn node(name: &str, vm: &str) -> NodeConfig {
    NodeConfig {
        name: name.to_string(),
        vm: vm.to_string(),
        ..NodeConfig::default()
    }
}

fn peer(name: &str, vm: &str, address: &str, host_env: Option<&str>) -> PeerConfig {
    PeerConfig {
        name: name.to_string(),
        vm: vm.to_string(),
        address: address.to_string(),
        host_env: host_env.map(str::to_string),
    }
}
