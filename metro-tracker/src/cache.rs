//! Single-slot widget cache.
//!
//! Holds the last entry the widget displayed, persisted in the shared store
//! so the interactive app can refresh it too. There is exactly one slot:
//! every write replaces the whole entry, success or failure.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::sl::{Departure, StopDeviation};
use crate::store::{KeyValueStore, StoreError, load_json, save_json};

/// Store key for the widget slot.
pub const WIDGET_CACHE_KEY: &str = "widgetCache";

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long an entry counts as fresh.
    pub ttl: Duration,

    /// Store key holding the slot.
    pub key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            key: WIDGET_CACHE_KEY.to_string(),
        }
    }
}

/// What the widget shows: departures for a station, or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub produced_at: DateTime<Utc>,
    pub station_name: Option<String>,
    pub departures: Vec<Departure>,
    pub error: Option<String>,

    /// Site-wide notices that came with the departures.
    #[serde(default)]
    pub stop_deviations: Vec<StopDeviation>,
}

impl CacheEntry {
    /// A successful fetch.
    pub fn departures(
        station_name: impl Into<String>,
        departures: Vec<Departure>,
        produced_at: DateTime<Utc>,
    ) -> Self {
        Self {
            produced_at,
            station_name: Some(station_name.into()),
            departures,
            error: None,
            stop_deviations: Vec::new(),
        }
    }

    /// Attach the site's stop deviations.
    pub fn with_stop_deviations(mut self, stop_deviations: Vec<StopDeviation>) -> Self {
        self.stop_deviations = stop_deviations;
        self
    }

    /// A failed attempt, recorded so the widget can show why.
    pub fn failed(
        station_name: Option<String>,
        error: impl Into<String>,
        produced_at: DateTime<Utc>,
    ) -> Self {
        Self {
            produced_at,
            station_name,
            departures: Vec::new(),
            error: Some(error.into()),
            stop_deviations: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// On-store shape of the slot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    entry: CacheEntry,
    produced_at_epoch_seconds: i64,
}

/// TTL cache over one key of a shared store.
///
/// Staleness is measured in whole seconds against the epoch timestamp
/// written alongside the entry.
pub struct FreshnessCache<S: ?Sized> {
    store: Arc<S>,
    config: CacheConfig,
}

impl<S: ?Sized> Clone for FreshnessCache<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: KeyValueStore + ?Sized> FreshnessCache<S> {
    pub fn new(store: Arc<S>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    fn read_stored(&self) -> Result<Option<StoredEntry>, StoreError> {
        load_json(self.store.as_ref(), &self.config.key)
    }

    /// The current entry, fresh or not.
    pub fn read(&self) -> Result<Option<CacheEntry>, StoreError> {
        Ok(self.read_stored()?.map(|stored| stored.entry))
    }

    /// Overwrite the slot.
    pub fn write(&self, entry: &CacheEntry) -> Result<(), StoreError> {
        let stored = StoredEntry {
            entry: entry.clone(),
            produced_at_epoch_seconds: entry.produced_at.timestamp(),
        };
        save_json(self.store.as_ref(), &self.config.key, &stored)?;
        debug!(
            station = entry.station_name.as_deref().unwrap_or("-"),
            departures = entry.departures.len(),
            error = entry.is_error(),
            "wrote widget cache"
        );
        Ok(())
    }

    /// True iff an entry exists and `now - producedAt < max_age`.
    ///
    /// An unreadable slot counts as absent.
    pub fn is_fresh(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        self.fresh_stored(max_age, now).is_some()
    }

    /// The entry, if it is younger than the configured TTL.
    pub fn fresh_entry(&self, now: DateTime<Utc>) -> Option<CacheEntry> {
        self.fresh_stored(self.config.ttl, now)
            .map(|stored| stored.entry)
    }

    fn fresh_stored(&self, max_age: Duration, now: DateTime<Utc>) -> Option<StoredEntry> {
        let stored = match self.read_stored() {
            Ok(stored) => stored?,
            Err(e) => {
                warn!(error = %e, "widget cache unreadable, treating as empty");
                return None;
            }
        };

        let age = now.timestamp() - stored.produced_at_epoch_seconds;
        let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        (age < max_age).then_some(stored)
    }
}
