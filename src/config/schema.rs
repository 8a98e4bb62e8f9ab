//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a mesh node.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a mesh node.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MeshConfig {
    /// Identity of this node.
    pub node: NodeConfig,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Outbound probe settings.
    pub probe: ProbeConfig,

    /// Regional clock used for health timestamps.
    pub clock: ClockConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Peers this node can probe.
    pub peers: Vec<PeerConfig>,
}

impl MeshConfig {
    /// Route segment for this node (`API2` → `api2`).
    pub fn route_segment(&self) -> String {
        self.node.name.to_lowercase()
    }

    /// Path of the probe route for `peer`, e.g. `/api2/202300653/call-api1`.
    pub fn probe_path(&self, peer: &PeerConfig) -> String {
        format!(
            "/{}/{}/call-{}",
            self.route_segment(),
            self.node.owner_id,
            peer.route_segment()
        )
    }
}

/// Node identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node name (e.g., "API1"). Its lowercase form is the route prefix.
    pub name: String,

    /// Machine identifier reported as `vm`.
    pub vm: String,

    /// Owner identifier reported as `carnet` in every response.
    pub owner_id: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: "API1".to_string(),
            vm: "1".to_string(),
            owner_id: "202300653".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Outbound probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Ceiling for a whole probe (connect, headers and body) in seconds.
    pub timeout_secs: u64,

    /// Path requested on the peer.
    pub path: String,

    /// Largest peer body that will be decoded.
    pub max_body_bytes: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 3,
            path: "/health".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Regional clock configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    /// IANA time zone name.
    pub timezone: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Guatemala".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Address the exporter listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A peer reachable from this node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PeerConfig {
    /// Peer name (e.g., "API3"), reported as `apiname`.
    pub name: String,

    /// Machine the peer runs on, used in report messages.
    pub vm: String,

    /// Peer address as `host:port`.
    pub address: String,

    /// Environment variable that, when set and non-empty, replaces the host part.
    #[serde(default)]
    pub host_env: Option<String>,
}

impl PeerConfig {
    /// Route segment for this peer (`API3` → `api3`).
    pub fn route_segment(&self) -> String {
        self.name.to_lowercase()
    }

    /// Address after applying the host override, if any.
    pub fn resolved_address(&self) -> String {
        let host = self
            .host_env
            .as_deref()
            .and_then(|key| std::env::var(key).ok())
            .filter(|v| !v.is_empty());

        match host {
            Some(host) => match self.address.rsplit_once(':') {
                Some((_, port)) => format!("{}:{}", host, port),
                None => host,
            },
            None => self.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(address: &str, host_env: Option<&str>) -> PeerConfig {
        PeerConfig {
            name: "API3".into(),
            vm: "2".into(),
            address: address.into(),
            host_env: host_env.map(Into::into),
        }
    }

    #[test]
    fn probe_path_uses_lowercase_names() {
        let config = MeshConfig::default();
        let p = peer("localhost:8083", None);
        assert_eq!(config.probe_path(&p), "/api1/202300653/call-api3");
    }

    #[test]
    fn host_override_keeps_port() {
        std::env::set_var("MESH_TEST_HOST_OVERRIDE", "10.0.0.7");
        let p = peer("localhost:8083", Some("MESH_TEST_HOST_OVERRIDE"));
        assert_eq!(p.resolved_address(), "10.0.0.7:8083");
    }

    #[test]
    fn empty_override_is_ignored() {
        std::env::set_var("MESH_TEST_HOST_EMPTY", "");
        let p = peer("localhost:8083", Some("MESH_TEST_HOST_EMPTY"));
        assert_eq!(p.resolved_address(), "localhost:8083");

        let unset = peer("localhost:8083", Some("MESH_TEST_HOST_NEVER_SET"));
        assert_eq!(unset.resolved_address(), "localhost:8083");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: MeshConfig = toml::from_str(
            r#"
            [node]
            name = "API2"

            [[peers]]
            name = "API1"
            vm = "1"
            address = "localhost:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.node.name, "API2");
        assert_eq!(config.node.owner_id, "202300653");
        assert_eq!(config.probe.timeout_secs, 3);
        assert_eq!(config.clock.timezone, "America/Guatemala");
        assert_eq!(config.peers.len(), 1);
        assert!(config.peers[0].host_env.is_none());
    }
}
