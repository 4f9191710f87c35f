//! Network-local time handling.
//!
//! The upstream API reports `scheduled` and `expected` as naive wall-clock
//! strings (`2025-01-27T10:04:00`) in the network's home zone. This module
//! pins them to Europe/Stockholm and converts to UTC so they can be compared
//! with the current instant.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Home zone of the transit network.
pub const NETWORK_TZ: Tz = chrono_tz::Europe::Stockholm;

/// Format of upstream timestamps.
const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse an upstream wall-clock timestamp into a UTC instant.
///
/// Returns `None` when the string is malformed or names a local time that
/// does not exist (the spring-forward gap). Ambiguous times in the autumn
/// overlap resolve to the earlier instant.
///
/// # Examples
///
/// ```
/// use metro_tracker::domain::parse_local;
///
/// let t = parse_local("2025-01-27T10:00:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2025-01-27T09:00:00+00:00");
///
/// assert!(parse_local("10:00").is_none());
/// ```
pub fn parse_local(s: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, LOCAL_FORMAT).ok()?;
    NETWORK_TZ
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a UTC instant as an upstream-style wall-clock string.
pub fn format_local(t: DateTime<Utc>) -> String {
    t.with_timezone(&NETWORK_TZ)
        .format(LOCAL_FORMAT)
        .to_string()
}
