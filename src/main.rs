//! Health-check mesh node.
//!
//! One binary serves any of the three nodes. Each node answers `/health`
//! and probes its peers on demand:
//!
//! ```text
//!     caller ──GET /api1/<owner>/call-api2──▶ ┌──────┐ ──GET /health──▶ ┌──────┐
//!            ◀──── PeerStatusReport ───────── │ API1 │ ◀── HealthReport ─ │ API2 │
//!                                             └──────┘   (3s ceiling)    └──────┘
//! ```
//!
//! Configuration comes from `--config <file>` (`MESH_CONFIG`) or one of the
//! built-in presets `--node api1|api2|api3` (`MESH_NODE`).

use std::path::PathBuf;

use clap::Parser;

use health_mesh::config::{NodePreset, ObservabilityConfig};
use health_mesh::lifecycle::{self, signals, ConfigSource, Shutdown};
use health_mesh::observability::init_logging;

#[derive(Parser)]
#[command(name = "health-mesh")]
#[command(about = "Health-check mesh node", long_about = None)]
struct Args {
    /// TOML configuration file. Takes precedence over --node.
    #[arg(short, long, env = "MESH_CONFIG")]
    config: Option<PathBuf>,

    /// Built-in node preset.
    #[arg(short, long, env = "MESH_NODE", default_value = "api1")]
    node: NodePreset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let source = match args.config {
        Some(path) => ConfigSource::File(path),
        None => ConfigSource::Preset(args.node),
    };

    let config = match lifecycle::resolve_config(&source) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(source = ?source, error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), source = ?source, "health-mesh starting");

    let node = match lifecycle::bootstrap(config).await {
        Ok(node) => node,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    node.server.run(node.listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
