//! Health reporting and peer probing subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health:
//!     clock.rs (regional timestamp)
//!     → report.rs (HealthReport)
//!
//! GET /<node>/<owner>/call-<peer>:
//!     prober.rs (one bounded GET to the peer)
//!     → ProbeOutcome (Working / NotReady / Unreachable)
//!     → report.rs (PeerStatusReport)
//! ```
//!
//! # Design Decisions
//! - Reports are built per request and never stored
//! - A probe is a single attempt; there is no retry or health history
//! - Transport and format failures stay collapsed into two messages

pub mod clock;
pub mod prober;
pub mod report;

pub use clock::{ClockError, RegionalClock};
pub use prober::{PeerProber, ProbeError};
pub use report::{HealthReport, HealthStatus, PeerStatusReport, ProbeOutcome};
