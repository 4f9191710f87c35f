//! Station name lookup.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use super::table::{ALIASES, STATIONS};

/// Site returned for names missing from the table: T-Centralen, the hub
/// every metro line passes through.
pub const FALLBACK_SITE_ID: &str = "9001";

/// Name -> site id, canonical names and aliases together.
static BY_NAME: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    STATIONS
        .iter()
        .chain(ALIASES.iter())
        .copied()
        .collect()
});

/// A station from the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Station {
    pub name: &'static str,
    pub site_id: &'static str,
}

/// Resolve a station display name to its upstream site identifier.
///
/// Lookup is exact and case-sensitive, with a few known alternative
/// spellings. Unknown names resolve to [`FALLBACK_SITE_ID`]; this is a
/// deliberate lossy default, not an error.
///
/// # Examples
///
/// ```
/// use metro_tracker::stations::{FALLBACK_SITE_ID, resolve};
///
/// assert_eq!(resolve("Slussen"), "9192");
/// assert_eq!(resolve("Tcentralen"), "9001");
/// assert_eq!(resolve("Atlantis"), FALLBACK_SITE_ID);
/// ```
pub fn resolve(name: &str) -> &'static str {
    BY_NAME.get(name).copied().unwrap_or(FALLBACK_SITE_ID)
}

/// Whether `name` is in the table (canonical name or alias).
pub fn is_known(name: &str) -> bool {
    BY_NAME.contains_key(name)
}

/// All canonical stations, in table order. Aliases are not included.
pub fn stations() -> impl Iterator<Item = Station> {
    STATIONS
        .iter()
        .map(|&(name, site_id)| Station { name, site_id })
}

/// Find stations whose name contains `query`, ignoring case.
///
/// Prefix matches come before other matches; within each group the table
/// order is kept. An empty query matches everything.
pub fn search(query: &str, limit: usize) -> Vec<Station> {
    let needle = query.trim().to_lowercase();

    let mut prefix = Vec::new();
    let mut infix = Vec::new();
    for station in stations() {
        let hay = station.name.to_lowercase();
        if hay.starts_with(&needle) {
            prefix.push(station);
        } else if hay.contains(&needle) {
            infix.push(station);
        }
    }

    prefix.into_iter().chain(infix).take(limit).collect()
}
