//! Peer probing.
//!
//! # Responsibilities
//! - Issue one GET to a peer's health path, bounded by the probe timeout
//! - Classify the result into a `ProbeOutcome`
//!
//! The timeout covers connect, response headers and body read. The response
//! is either read to completion or dropped on every branch, so no connection
//! outlives the probe. There are no retries.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::time;

use crate::config::{PeerConfig, ProbeConfig};
use crate::health::report::{HealthReport, ProbeOutcome};
use crate::observability::metrics;

const USER_AGENT: &str = "health-mesh-probe";

/// Why a probe did not produce a health report.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid probe request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("connection error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("failed to read body: {0}")]
    Body(axum::Error),

    #[error("malformed health report: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProbeError {
    /// Outcome reported to the caller for this failure.
    ///
    /// A peer that answered with an unreadable body counts as "not UP",
    /// everything that never produced a success response counts as "not working".
    pub fn outcome(&self) -> ProbeOutcome {
        match self {
            ProbeError::Body(_) | ProbeError::Decode(_) => ProbeOutcome::NotReady,
            _ => ProbeOutcome::Unreachable,
        }
    }
}

/// Client that probes peers' health endpoints.
#[derive(Clone)]
pub struct PeerProber {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    path: String,
    max_body_bytes: usize,
}

impl PeerProber {
    pub fn new(config: &ProbeConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            client,
            timeout: Duration::from_secs(config.timeout_secs),
            path: config.path.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }

    /// Probe `peer` once and classify the result.
    pub async fn probe(&self, peer: &PeerConfig) -> ProbeOutcome {
        let address = peer.resolved_address();
        let start = Instant::now();

        let outcome = match self.check(&address).await {
            Ok(report) if report.status.is_up() => ProbeOutcome::Working,
            Ok(report) => {
                tracing::warn!(
                    peer = %peer.name,
                    addr = %address,
                    status = report.status.as_str(),
                    "Peer answered but is not UP"
                );
                ProbeOutcome::NotReady
            }
            Err(e) => {
                tracing::warn!(peer = %peer.name, addr = %address, error = %e, "Peer probe failed");
                e.outcome()
            }
        };

        tracing::debug!(
            peer = %peer.name,
            outcome = outcome.as_str(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Peer probed"
        );
        metrics::record_probe(&peer.name, outcome, start);

        outcome
    }

    /// Fetch and decode the health report served at `address`.
    pub async fn check(&self, address: &str) -> Result<HealthReport, ProbeError> {
        time::timeout(self.timeout, self.fetch(address))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
    }

    async fn fetch(&self, address: &str) -> Result<HealthReport, ProbeError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(format!("http://{}{}", address, self.path))
            .header(header::USER_AGENT, USER_AGENT)
            .body(Body::empty())?;

        let response = self.client.request(request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProbeError::Status(status));
        }

        let body = axum::body::to_bytes(Body::new(response.into_body()), self.max_body_bytes)
            .await
            .map_err(ProbeError::Body)?;

        Ok(HealthReport::from_peer_body(&body)?)
    }
}
