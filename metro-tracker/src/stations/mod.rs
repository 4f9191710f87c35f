//! Station name lookup.
//!
//! Maps station display names to upstream site identifiers using a
//! static table compiled into the binary.

mod names;
mod table;

pub use names::{FALLBACK_SITE_ID, Station, is_known, resolve, search, stations};
