//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in preset (presets.rs)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MeshConfig (validated, immutable)
//!     → shared via Arc with the HTTP handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod presets;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use presets::NodePreset;
pub use schema::ClockConfig;
pub use schema::ListenerConfig;
pub use schema::MeshConfig;
pub use schema::NodeConfig;
pub use schema::ObservabilityConfig;
pub use schema::PeerConfig;
pub use schema::ProbeConfig;
