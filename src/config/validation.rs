//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every name used as a route segment is path-safe
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate or self-referencing peers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MeshConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::MeshConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} '{value}' may only contain ASCII letters, digits, '.', '_', '~' and '-'")]
    NotPathSafe { field: &'static str, value: String },

    #[error("probe.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("probe.path '{0}' must start with '/'")]
    RelativeProbePath(String),

    #[error("{field} '{value}' is not a valid socket address")]
    BadSocketAddr { field: &'static str, value: String },

    #[error("duplicate peer '{0}'")]
    DuplicatePeer(String),

    #[error("peer '{0}' has the same name as this node")]
    PeerIsSelf(String),

    #[error("observability.log_format '{0}' must be 'pretty' or 'json'")]
    UnknownLogFormat(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MeshConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_segment(&mut errors, "node.name", &config.node.name);
    check_segment(&mut errors, "node.owner_id", &config.node.owner_id);

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadSocketAddr {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if !config.probe.path.starts_with('/') {
        errors.push(ValidationError::RelativeProbePath(config.probe.path.clone()));
    }

    if config.clock.timezone.is_empty() {
        errors.push(ValidationError::Empty { field: "clock.timezone" });
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::UnknownLogFormat(other.to_string())),
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::BadSocketAddr {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for peer in &config.peers {
        check_segment(&mut errors, "peers.name", &peer.name);
        if peer.address.is_empty() {
            errors.push(ValidationError::Empty { field: "peers.address" });
        }
        if peer.route_segment() == config.route_segment() {
            errors.push(ValidationError::PeerIsSelf(peer.name.clone()));
        }
        if !seen.insert(peer.route_segment()) {
            errors.push(ValidationError::DuplicatePeer(peer.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_segment(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::Empty { field });
    } else if !value.chars().all(is_route_char) {
        errors.push(ValidationError::NotPathSafe {
            field,
            value: value.to_string(),
        });
    }
}

/// Unreserved URI characters: matched literally by the router, never percent-encoded.
fn is_route_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '~' | '-')
}
