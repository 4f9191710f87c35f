//! Application state for the web layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::live::LiveBoard;
use crate::pins::PinStore;
use crate::refresh::{RefreshConfig, RefreshScheduler};
use crate::sl::Upstream;
use crate::store::KeyValueStore;

/// Source of the current time.
pub type Clock = fn() -> DateTime<Utc>;

/// Shared application state.
///
/// The interactive board, the widget scheduler and the pin list all sit
/// on the same store, so the HTTP surface sees what the widget process
/// writes and vice versa.
#[derive(Clone)]
pub struct AppState {
    pub live: Arc<LiveBoard<dyn KeyValueStore, Upstream>>,
    pub widget: Arc<RefreshScheduler<dyn KeyValueStore, Upstream>>,
    pub pins: Arc<PinStore<dyn KeyValueStore>>,
    clock: Clock,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, upstream: Upstream, refresh: RefreshConfig) -> Self {
        Self {
            live: Arc::new(LiveBoard::new(Arc::clone(&store), upstream.clone())),
            widget: Arc::new(RefreshScheduler::new(Arc::clone(&store), upstream, refresh)),
            pins: Arc::new(PinStore::new(store)),
            clock: Utc::now,
        }
    }

    /// Replace the clock (for tests and replaying recordings).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
