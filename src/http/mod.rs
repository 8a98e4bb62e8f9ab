//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, static route table)
//!     → request.rs (request ID, tracing span)
//!     → handlers.rs (health report or peer probe)
//!     → JSON response to caller
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, MeshServer};
