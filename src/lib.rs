//! Health-check mesh node library.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::MeshConfig;
pub use http::MeshServer;
pub use lifecycle::Shutdown;
