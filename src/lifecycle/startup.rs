//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration (file or preset) and validate it
//! - Load the regional clock
//! - Start the optional metrics exporter
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: every step returns a `StartupError` and nothing is retried
//! - The listener binds last, so traffic only arrives once the node is ready
//! - The process entry point decides to exit; nothing here aborts

use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, validation::validate_config, ConfigError, MeshConfig, NodePreset};
use crate::health::{ClockError, RegionalClock};
use crate::http::MeshServer;
use crate::observability::metrics;

/// A condition that prevents the node from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where the node's configuration comes from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(PathBuf),
    Preset(NodePreset),
}

/// Load (or build) and validate the configuration.
pub fn resolve_config(source: &ConfigSource) -> Result<MeshConfig, StartupError> {
    match source {
        ConfigSource::File(path) => Ok(load_config(path)?),
        ConfigSource::Preset(preset) => {
            let config = preset.config();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// A node that is ready to serve.
pub struct Node {
    pub server: MeshServer,
    pub listener: TcpListener,
}

/// Run every startup step for `config`, in order.
pub async fn bootstrap(config: MeshConfig) -> Result<Node, StartupError> {
    let clock = RegionalClock::load(&config.clock.timezone)?;
    tracing::info!(timezone = clock.zone().name(), "Regional clock loaded");

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr)?;
        }
    }

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    tracing::info!(
        node = %config.node.name,
        peers = config.peers.len(),
        probe_timeout_secs = config.probe.timeout_secs,
        "Node initialized"
    );

    Ok(Node {
        server: MeshServer::new(config, clock),
        listener,
    })
}
