//! Upstream site identifier type.

use std::fmt;

/// Error returned when parsing an invalid site identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid site id: {reason}")]
pub struct InvalidSiteId {
    reason: &'static str,
}

/// Longest site identifier the upstream API hands out.
const MAX_LEN: usize = 10;

/// A numeric SL site identifier (e.g. `9001` for T-Centralen).
///
/// Site identifiers name a cluster of stop points in the upstream
/// departures API. They are always short strings of ASCII digits, which
/// makes them safe to splice into a URL path.
///
/// # Examples
///
/// ```
/// use metro_tracker::domain::SiteId;
///
/// let tc = SiteId::parse("9001").unwrap();
/// assert_eq!(tc.as_str(), "9001");
///
/// // Non-digits are rejected
/// assert!(SiteId::parse("90a1").is_err());
///
/// // Empty input is rejected
/// assert!(SiteId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SiteId(String);

impl SiteId {
    /// Parse a site identifier from a string.
    ///
    /// The input must be 1 to 10 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidSiteId> {
        if s.is_empty() {
            return Err(InvalidSiteId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidSiteId {
                reason: "must be at most 10 digits",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidSiteId {
                reason: "must be ASCII digits 0-9",
            });
        }

        Ok(SiteId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SiteId({})", self.0)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
