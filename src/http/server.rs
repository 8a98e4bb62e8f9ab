//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the node's static routes
//! - Wire up middleware (tracing, request ID)
//! - Serve on a bound listener until shutdown

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{MeshConfig, NodeConfig};
use crate::health::{PeerProber, RegionalClock};
use crate::http::handlers::{health_handler, peer_handler};
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub node: Arc<NodeConfig>,
    pub clock: RegionalClock,
    pub prober: PeerProber,
}

/// HTTP server for one mesh node.
pub struct MeshServer {
    router: Router,
    config: MeshConfig,
}

impl MeshServer {
    /// Create a server for `config`. The clock must already be loaded.
    pub fn new(config: MeshConfig, clock: RegionalClock) -> Self {
        let state = AppState {
            node: Arc::new(config.node.clone()),
            clock,
            prober: PeerProber::new(&config.probe),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router: `/health` plus one probe route per peer.
    fn build_router(config: &MeshConfig, state: AppState) -> Router {
        let mut router = Router::new().route("/health", get(health_handler));

        for peer in &config.peers {
            let path = config.probe_path(peer);
            let peer = Arc::new(peer.clone());
            tracing::debug!(path = %path, peer = %peer.name, "Registering probe route");

            router = router.route(
                &path,
                get(move |State(state): State<AppState>| peer_handler(state, Arc::clone(&peer))),
            );
        }

        router
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(set_request_id_layer())
    }

    /// A clone of the router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Paths of every registered route.
    pub fn route_paths(&self) -> Vec<String> {
        std::iter::once("/health".to_string())
            .chain(self.config.peers.iter().map(|p| self.config.probe_path(p)))
            .collect()
    }

    /// Serve on `listener` until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            node = %self.config.node.name,
            address = %addr,
            routes = ?self.route_paths(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
