//! Pinned (favourite) stations.
//!
//! The list lives in the shared store under one key. Every call re-reads it,
//! so the app and the widget each see the other's latest write.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::store::{KeyValueStore, StoreError, load_json, save_json};

/// Store key for the pinned list.
pub const PINNED_STATIONS_KEY: &str = "pinnedStations";

/// Maximum number of pinned stations; pinning past this evicts the oldest.
pub const MAX_PINNED_STATIONS: usize = 8;

/// A station the user pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedStation {
    /// Upstream site id.
    pub id: String,
    pub name: String,
    pub pinned_at: DateTime<Utc>,
}

/// Ordered, capped list of pinned stations, newest first.
pub struct PinStore<S: ?Sized> {
    store: Arc<S>,
    /// Serialises read-modify-write within this process.
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore + ?Sized> PinStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// All pinned stations, most recently pinned first.
    pub fn list(&self) -> Result<Vec<PinnedStation>, StoreError> {
        let mut pins: Vec<PinnedStation> =
            load_json(self.store.as_ref(), PINNED_STATIONS_KEY)?.unwrap_or_default();
        pins.sort_by(|a, b| b.pinned_at.cmp(&a.pinned_at));
        Ok(pins)
    }

    /// The station the widget follows: the most recently pinned one.
    pub fn active(&self) -> Result<Option<PinnedStation>, StoreError> {
        Ok(self.list()?.into_iter().next())
    }

    pub fn is_pinned(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|p| p.id == id))
    }

    /// Pin a station now. See [`PinStore::pin_at`].
    pub fn pin(&self, id: &str, name: &str) -> Result<bool, StoreError> {
        self.pin_at(id, name, Utc::now())
    }

    /// Pin a station at the front of the list.
    ///
    /// Returns `false` without writing if `id` is already pinned. If the
    /// list is full the oldest entry is dropped.
    pub fn pin_at(&self, id: &str, name: &str, at: DateTime<Utc>) -> Result<bool, StoreError> {
        let _guard = self.lock();
        let mut pins = self.list()?;

        if pins.iter().any(|p| p.id == id) {
            debug!(id, "already pinned");
            return Ok(false);
        }

        pins.insert(
            0,
            PinnedStation {
                id: id.to_string(),
                name: name.to_string(),
                pinned_at: at,
            },
        );
        if let Some(evicted) = pins.get(MAX_PINNED_STATIONS) {
            info!(id = %evicted.id, name = %evicted.name, "evicting oldest pin");
        }
        pins.truncate(MAX_PINNED_STATIONS);

        self.save(&pins)?;
        info!(id, name, count = pins.len(), "pinned station");
        Ok(true)
    }

    /// Remove a station. Returns whether it was pinned.
    pub fn unpin(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock();
        let mut pins = self.list()?;
        let before = pins.len();
        pins.retain(|p| p.id != id);

        if pins.len() == before {
            debug!(id, "not pinned");
            return Ok(false);
        }

        self.save(&pins)?;
        info!(id, count = pins.len(), "unpinned station");
        Ok(true)
    }

    /// Pin if absent, unpin if present. Returns whether it is now pinned.
    pub fn toggle(&self, id: &str, name: &str) -> Result<bool, StoreError> {
        if self.is_pinned(id)? {
            self.unpin(id)?;
            Ok(false)
        } else {
            self.pin(id, name)?;
            Ok(true)
        }
    }

    fn save(&self, pins: &[PinnedStation]) -> Result<(), StoreError> {
        save_json(self.store.as_ref(), PINNED_STATIONS_KEY, pins)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}
