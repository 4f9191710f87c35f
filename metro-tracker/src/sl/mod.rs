//! SL transport API client.
//!
//! This module provides an HTTP client for the Stockholm public transport
//! departures API, which returns live departures for a site.
//!
//! Key characteristics of the feed:
//! - Sites are numeric ids; stations are resolved to them by name
//! - One response interleaves every transport mode serving the site, so
//!   metro departures are filtered out client-side
//! - Times are naive "YYYY-MM-DDTHH:MM:SS" strings in Stockholm local time

mod client;
mod error;
mod mock;
mod source;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use client::{SlClient, SlConfig};
pub use error::SlError;
pub use mock::MockSlClient;
pub use source::{DepartureSource, Upstream, retain_metro};
pub use types::{
    Departure, DepartureId, DeparturesResponse, Deviation, DeviationScope, Journey, Line,
    MetroDepartures, StopArea, StopDeviation, StopPoint, TransportMode,
};
