//! Interactive departure board.
//!
//! User-initiated refreshes always go to the network; the widget cache is
//! never consulted here. A refresh requested while one is already running
//! is dropped rather than queued.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::board::project;
use crate::cache::{CacheConfig, CacheEntry, FreshnessCache};
use crate::pins::PinStore;
use crate::sl::DepartureSource;
use crate::store::KeyValueStore;

/// Single-flight live fetches for any station.
pub struct LiveBoard<S: ?Sized, D> {
    source: D,
    pins: PinStore<S>,
    cache: FreshnessCache<S>,
    in_flight: Mutex<()>,
}

impl<S, D> LiveBoard<S, D>
where
    S: KeyValueStore + ?Sized,
    D: DepartureSource,
{
    pub fn new(store: Arc<S>, source: D) -> Self {
        Self {
            source,
            pins: PinStore::new(Arc::clone(&store)),
            cache: FreshnessCache::new(store, CacheConfig::default()),
            in_flight: Mutex::new(()),
        }
    }

    /// Fetch and project departures for `station_name`.
    ///
    /// Returns `None` if another refresh is in flight. A failed fetch is
    /// returned as an error entry. A successful fetch for the active pinned
    /// station also replaces the widget cache.
    pub async fn refresh(&self, station_name: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!(station = station_name, "refresh already in flight, ignoring");
            return None;
        };

        let entry = match self.source.fetch(station_name).await {
            Ok(fetched) => {
                let departures = project(fetched.departures, now);
                info!(station = station_name, count = departures.len(), "live departures");
                let entry = CacheEntry::departures(station_name, departures, now)
                    .with_stop_deviations(fetched.stop_deviations);
                self.share_with_widget(&entry);
                entry
            }
            Err(e) => {
                warn!(station = station_name, error = %e, "live fetch failed");
                CacheEntry::failed(Some(station_name.to_string()), e.user_message(), now)
            }
        };

        Some(entry)
    }

    fn share_with_widget(&self, entry: &CacheEntry) {
        let active = match self.pins.active() {
            Ok(active) => active,
            Err(e) => {
                warn!(error = %e, "pinned stations unreadable");
                return;
            }
        };

        let active_name = active.map(|p| p.name);
        if active_name.is_none() || active_name != entry.station_name {
            return;
        }

        if let Err(e) = self.cache.write(entry) {
            warn!(error = %e, "failed to update widget cache");
        }
    }
}
