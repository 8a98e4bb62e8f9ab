//! Wire-level report types.
//!
//! Both reports are immutable values built fresh for every request.
//! Field names on the wire are fixed: `vm`/`carnet` for the health report,
//! `apiname`/`connection`/`carnet` for the peer report.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::config::PeerConfig;

/// Status carried by a health report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down,
    /// Any other value a peer may send back.
    Other(String),
}

impl HealthStatus {
    pub fn as_str(&self) -> &str {
        match self {
            HealthStatus::Up => "UP",
            HealthStatus::Down => "DOWN",
            HealthStatus::Other(s) => s,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

impl From<&str> for HealthStatus {
    fn from(s: &str) -> Self {
        match s {
            "UP" => HealthStatus::Up,
            "DOWN" => HealthStatus::Down,
            other => HealthStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for HealthStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HealthStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(HealthStatus::from(s.as_str()))
    }
}

/// Body of `GET /health`.
///
/// Only `status` is required when decoding a peer's report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "vm", default)]
    pub node_id: String,
    #[serde(rename = "carnet", default)]
    pub owner_id: String,
}

impl HealthReport {
    /// Decode a report sent back by a peer.
    ///
    /// Only the first JSON value is read; anything after it is ignored.
    /// Object keys match regardless of case, an exact match winning over a
    /// folded one.
    pub fn from_peer_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next()
            .unwrap_or_else(|| serde_json::from_slice(body))?;

        let value = match value {
            Value::Object(map) => Value::Object(fold_keys(map)),
            other => other,
        };

        serde_json::from_value(value)
    }
}

fn fold_keys(map: Map<String, Value>) -> Map<String, Value> {
    let mut folded = Map::with_capacity(map.len());
    for (key, value) in map {
        let lower = key.to_lowercase();
        if key == lower || !folded.contains_key(&lower) {
            folded.insert(lower, value);
        }
    }
    folded
}

/// Body of a peer probe route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeerStatusReport {
    #[serde(rename = "apiname")]
    pub peer_name: String,
    pub message: String,
    #[serde(rename = "connection")]
    pub reachable: bool,
    #[serde(rename = "carnet")]
    pub owner_id: String,
}

/// Result of a single probe, before it is rendered for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Peer answered and reported UP.
    Working,
    /// Peer answered but its body did not decode or was not UP.
    NotReady,
    /// Transport error, timeout or a status other than 200.
    Unreachable,
}

impl ProbeOutcome {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeOutcome::Working => "working",
            ProbeOutcome::NotReady => "not_ready",
            ProbeOutcome::Unreachable => "unreachable",
        }
    }

    /// Render the outcome into the report returned to the caller.
    pub fn into_report(self, peer: &PeerConfig, owner_id: &str) -> PeerStatusReport {
        let (reachable, message) = match self {
            ProbeOutcome::Working => (
                true,
                format!("SUCCESS: The {} located on the VM{} is working", peer.name, peer.vm),
            ),
            ProbeOutcome::NotReady => (
                false,
                format!("ERROR: The {} located on the VM{} is not UP", peer.name, peer.vm),
            ),
            ProbeOutcome::Unreachable => (
                false,
                format!("ERROR: The {} located on the VM{} is not working", peer.name, peer.vm),
            ),
        };

        PeerStatusReport {
            peer_name: peer.name.clone(),
            message,
            reachable,
            owner_id: owner_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn api3() -> PeerConfig {
        PeerConfig {
            name: "API3".into(),
            vm: "2".into(),
            address: "localhost:8083".into(),
            host_env: None,
        }
    }

    #[test]
    fn health_report_wire_names() {
        let report = HealthReport {
            status: HealthStatus::Up,
            message: "API1 is Ready".into(),
            timestamp: "Mon, 02 Jan 2006 15:04:05 CST".into(),
            node_id: "1".into(),
            owner_id: "202300653".into(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "UP",
                "message": "API1 is Ready",
                "timestamp": "Mon, 02 Jan 2006 15:04:05 CST",
                "vm": "1",
                "carnet": "202300653",
            })
        );
    }

    #[test]
    fn minimal_peer_body_decodes() {
        let report: HealthReport = serde_json::from_str(r#"{"status":"UP"}"#).unwrap();
        assert!(report.status.is_up());
        assert!(report.owner_id.is_empty());

        assert!(serde_json::from_str::<HealthReport>(r#"{"vm":"1"}"#).is_err());
    }

    #[test]
    fn peer_body_ignores_trailing_data() {
        let report = HealthReport::from_peer_body(b"{\"status\":\"UP\"}\n{\"status\":\"DOWN\"}").unwrap();
        assert!(report.status.is_up());

        let report = HealthReport::from_peer_body(b"{\"status\":\"UP\"} trailing").unwrap();
        assert!(report.status.is_up());

        assert!(HealthReport::from_peer_body(b"").is_err());
        assert!(HealthReport::from_peer_body(b"not json").is_err());
    }

    #[test]
    fn peer_body_keys_match_any_case() {
        let report =
            HealthReport::from_peer_body(br#"{"Status":"UP","Message":"API2 is Ready","VM":"1","Carnet":"x"}"#)
                .unwrap();
        assert!(report.status.is_up());
        assert_eq!(report.message, "API2 is Ready");
        assert_eq!(report.node_id, "1");
        assert_eq!(report.owner_id, "x");

        let report = HealthReport::from_peer_body(br#"{"STATUS":"DOWN","status":"UP"}"#).unwrap();
        assert!(report.status.is_up());

        let report = HealthReport::from_peer_body(br#"{"status":"UP","Status":"DOWN"}"#).unwrap();
        assert!(report.status.is_up());
    }

    #[test]
    fn unknown_status_is_preserved() {
        let report: HealthReport = serde_json::from_value(json!({
            "status": "STARTING",
            "message": "",
            "timestamp": "",
            "vm": "2",
            "carnet": "x",
        }))
        .unwrap();

        assert_eq!(report.status, HealthStatus::Other("STARTING".into()));
        assert!(!report.status.is_up());
    }

    #[test]
    fn outcome_messages() {
        let peer = api3();

        let ok = ProbeOutcome::Working.into_report(&peer, "202300653");
        assert!(ok.reachable);
        assert_eq!(ok.message, "SUCCESS: The API3 located on the VM2 is working");

        let down = ProbeOutcome::Unreachable.into_report(&peer, "202300653");
        assert!(!down.reachable);
        assert_eq!(down.message, "ERROR: The API3 located on the VM2 is not working");

        let not_up = ProbeOutcome::NotReady.into_report(&peer, "202300653");
        assert!(!not_up.reachable);
        assert_eq!(not_up.message, "ERROR: The API3 located on the VM2 is not UP");

        let value: Value = serde_json::to_value(&down).unwrap();
        assert_eq!(value["apiname"], "API3");
        assert_eq!(value["connection"], false);
        assert_eq!(value["carnet"], "202300653");
    }
}
