//! Regional clock for health timestamps.
//!
//! Loading the zone is a startup step that returns a result; request
//! handlers only ever format with an already-loaded zone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// RFC 1123 layout with the zone abbreviation, e.g. `Mon, 02 Jan 2006 15:04:05 CST`.
pub const RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("unknown time zone '{0}'")]
    UnknownZone(String),
}

/// Wall clock pinned to one IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct RegionalClock {
    zone: Tz,
}

impl RegionalClock {
    /// Look up `name` in the time-zone database.
    pub fn load(name: &str) -> Result<Self, ClockError> {
        let zone = name
            .parse::<Tz>()
            .map_err(|_| ClockError::UnknownZone(name.to_string()))?;
        Ok(Self { zone })
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Current time in the regional zone, RFC 1123 formatted.
    pub fn now(&self) -> String {
        self.format(Utc::now())
    }

    pub fn format(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.zone).format(RFC1123).to_string()
    }
}
