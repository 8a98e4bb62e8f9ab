//! Request handlers for the node's routes.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::config::PeerConfig;
use crate::health::{HealthReport, HealthStatus, PeerStatusReport};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /health`: this node's own report. Never fails.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    metrics::record_health_request();

    Json(HealthReport {
        status: HealthStatus::Up,
        message: format!("{} is Ready", state.node.name),
        timestamp: state.clock.now(),
        node_id: state.node.vm.clone(),
        owner_id: state.node.owner_id.clone(),
    })
}

/// `GET /<node>/<owner>/call-<peer>`: probe one peer and report the outcome.
pub async fn peer_handler(state: AppState, peer: Arc<PeerConfig>) -> Json<PeerStatusReport> {
    let outcome = state.prober.probe(&peer).await;

    tracing::info!(peer = %peer.name, outcome = outcome.as_str(), "Peer status requested");

    Json(outcome.into_report(&peer, &state.node.owner_id))
}
