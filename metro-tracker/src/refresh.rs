//! Widget refresh policy.
//!
//! One invocation decides what the widget should show right now and when
//! it should be asked again. The host (a timer, or a scheduler re-running
//! the binary) is expected to call back at `next_refresh`, but a late or
//! repeated call is harmless: the outcome depends only on the store
//! contents and `now`. Overlapping calls run one at a time, so a caller
//! that waited sees the entry the first one wrote.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::board::project;
use crate::cache::{CacheConfig, CacheEntry, FreshnessCache};
use crate::pins::PinStore;
use crate::sl::DepartureSource;
use crate::store::KeyValueStore;

/// Error text for the widget when nothing is pinned.
pub const NO_PINNED_STATIONS: &str = "No pinned stations found";

/// Configuration for the scheduler.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// How long a cached entry is served without a fetch.
    pub ttl: Duration,

    /// Delay until the next requested refresh.
    pub interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            interval: Duration::from_secs(30),
        }
    }
}

/// Which branch produced a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefreshSource {
    NoPinnedStation,
    Cached,
    Fetched,
    Failed,
}

/// Outcome of one refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Refresh {
    pub entry: CacheEntry,
    pub source: RefreshSource,
    pub next_refresh: DateTime<Utc>,
}

/// Produces widget entries from pins, cache and a departure source.
pub struct RefreshScheduler<S: ?Sized, D> {
    pins: PinStore<S>,
    cache: FreshnessCache<S>,
    source: D,
    interval: chrono::Duration,
    in_flight: Mutex<()>,
}

impl<S, D> RefreshScheduler<S, D>
where
    S: KeyValueStore + ?Sized,
    D: DepartureSource,
{
    pub fn new(store: Arc<S>, source: D, config: RefreshConfig) -> Self {
        let cache = FreshnessCache::new(
            Arc::clone(&store),
            CacheConfig {
                ttl: config.ttl,
                ..CacheConfig::default()
            },
        );

        Self {
            pins: PinStore::new(store),
            cache,
            source,
            interval: chrono::Duration::from_std(config.interval)
                .unwrap_or_else(|_| chrono::Duration::seconds(30)),
            in_flight: Mutex::new(()),
        }
    }

    /// Produce the entry to display at `now`.
    ///
    /// - Nothing pinned: an error entry, nothing fetched or written.
    /// - Fresh cache for the active station: the cached entry, no fetch.
    /// - Otherwise one fetch; the projected departures or the failure are
    ///   written to the cache.
    pub async fn refresh(&self, now: DateTime<Utc>) -> Refresh {
        let next_refresh = now + self.interval;
        let (entry, source) = {
            let _guard = self.in_flight.lock().await;
            self.produce(now).await
        };
        debug!(?source, %next_refresh, "widget refresh");
        Refresh {
            entry,
            source,
            next_refresh,
        }
    }

    async fn produce(&self, now: DateTime<Utc>) -> (CacheEntry, RefreshSource) {
        let active = match self.pins.active() {
            Ok(active) => active,
            Err(e) => {
                warn!(error = %e, "pinned stations unreadable, treating as none");
                None
            }
        };

        let Some(station) = active else {
            return (
                CacheEntry::failed(None, NO_PINNED_STATIONS, now),
                RefreshSource::NoPinnedStation,
            );
        };

        if let Some(cached) = self.cache.fresh_entry(now) {
            if cached.station_name.as_deref() == Some(station.name.as_str()) {
                debug!(station = %station.name, "widget cache hit");
                return (cached, RefreshSource::Cached);
            }
            debug!(
                station = %station.name,
                cached = cached.station_name.as_deref().unwrap_or("-"),
                "widget cache holds another station"
            );
        }

        let (entry, source) = match self.source.fetch(&station.name).await {
            Ok(fetched) => {
                let departures = project(fetched.departures, now);
                info!(station = %station.name, count = departures.len(), "fetched departures");
                (
                    CacheEntry::departures(&station.name, departures, now)
                        .with_stop_deviations(fetched.stop_deviations),
                    RefreshSource::Fetched,
                )
            }
            Err(e) => {
                warn!(station = %station.name, error = %e, "departure fetch failed");
                (
                    CacheEntry::failed(Some(station.name.clone()), e.user_message(), now),
                    RefreshSource::Failed,
                )
            }
        };

        if let Err(e) = self.cache.write(&entry) {
            warn!(error = %e, "failed to write widget cache");
        }

        (entry, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sl::testing::{FakeSource, Gate, recorded_metro, recorded_stop_deviations};
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use tokio::sync::Notify;

    fn t0() -> DateTime<Utc> {
        // 10:00 Stockholm
        Utc.with_ymd_and_hms(2025, 1, 27, 9, 0, 0).unwrap()
    }

    fn secs(n: i64) -> chrono::Duration {
        chrono::Duration::seconds(n)
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        source: Arc<FakeSource>,
        scheduler: RefreshScheduler<MemoryStore, Arc<FakeSource>>,
    }

    fn fixture(source: FakeSource) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let source = Arc::new(source);
        let scheduler =
            RefreshScheduler::new(Arc::clone(&store), Arc::clone(&source), RefreshConfig::default());
        Fixture {
            store,
            source,
            scheduler,
        }
    }

    fn pin(f: &Fixture, id: &str, name: &str, at: DateTime<Utc>) {
        PinStore::new(Arc::clone(&f.store))
            .pin_at(id, name, at)
            .unwrap();
    }

    fn cached(f: &Fixture) -> Option<CacheEntry> {
        FreshnessCache::new(Arc::clone(&f.store), CacheConfig::default())
            .read()
            .unwrap()
    }

    #[tokio::test]
    async fn fetched_entry_keeps_stop_deviations() {
        let f = fixture(
            FakeSource::new(recorded_metro()).with_stop_deviations(recorded_stop_deviations()),
        );
        pin(&f, "9001", "T-Centralen", t0());

        let out = f.scheduler.refresh(t0()).await;
        assert_eq!(out.entry.stop_deviations, recorded_stop_deviations());
        assert_eq!(cached(&f).unwrap().stop_deviations.len(), 1);

        // Served from cache with the notice intact
        let again = f.scheduler.refresh(t0() + secs(5)).await;
        assert_eq!(again.source, RefreshSource::Cached);
        assert_eq!(again.entry.stop_deviations, recorded_stop_deviations());
    }

    #[tokio::test]
    async fn no_pinned_station() {
        let f = fixture(FakeSource::new(recorded_metro()));
        let out = f.scheduler.refresh(t0()).await;

        assert_eq!(out.source, RefreshSource::NoPinnedStation);
        assert_eq!(out.entry.error.as_deref(), Some(NO_PINNED_STATIONS));
        assert!(out.entry.departures.is_empty());
        assert_eq!(out.next_refresh, t0() + secs(30));
        assert_eq!(f.source.calls(), 0);
        assert!(cached(&f).is_none());
    }

    #[tokio::test]
    async fn miss_fetches_projects_and_writes() {
        let f = fixture(FakeSource::new(recorded_metro()));
        pin(&f, "9001", "T-Centralen", t0());

        let out = f.scheduler.refresh(t0()).await;

        assert_eq!(out.source, RefreshSource::Fetched);
        assert_eq!(f.source.calls(), 1);
        assert_eq!(out.entry.station_name.as_deref(), Some("T-Centralen"));
        let lines: Vec<_> = out
            .entry
            .departures
            .iter()
            .map(|d| d.line.designation.as_str())
            .collect();
        assert_eq!(lines, vec!["17", "13", "14"]);
        assert_eq!(cached(&f), Some(out.entry));
    }

    #[tokio::test]
    async fn fresh_hit_skips_network() {
        let f = fixture(FakeSource::new(recorded_metro()));
        pin(&f, "9001", "T-Centralen", t0());

        let first = f.scheduler.refresh(t0()).await;
        let second = f.scheduler.refresh(t0() + secs(29)).await;

        assert_eq!(second.source, RefreshSource::Cached);
        assert_eq!(second.entry, first.entry);
        assert_eq!(second.next_refresh, t0() + secs(59));
        assert_eq!(f.source.calls(), 1);
    }

    #[tokio::test]
    async fn stale_entry_refetches() {
        let f = fixture(FakeSource::new(recorded_metro()));
        pin(&f, "9001", "T-Centralen", t0());

        f.scheduler.refresh(t0()).await;
        let out = f.scheduler.refresh(t0() + secs(30)).await;

        assert_eq!(out.source, RefreshSource::Fetched);
        assert_eq!(f.source.calls(), 2);
    }

    #[tokio::test]
    async fn failure_is_cached_as_error_entry() {
        let f = fixture(FakeSource::failing());
        pin(&f, "9192", "Slussen", t0());

        let out = f.scheduler.refresh(t0()).await;

        assert_eq!(out.source, RefreshSource::Failed);
        assert_eq!(out.entry.error.as_deref(), Some("Network connection failed"));
        assert_eq!(out.entry.station_name.as_deref(), Some("Slussen"));
        assert_eq!(out.next_refresh, t0() + secs(30));
        assert_eq!(cached(&f), Some(out.entry));

        // A cached failure is served while fresh, like any entry
        let again = f.scheduler.refresh(t0() + secs(10)).await;
        assert_eq!(again.source, RefreshSource::Cached);
        assert_eq!(f.source.calls(), 1);
    }

    #[tokio::test]
    async fn recovers_after_failure_once_stale() {
        let f = fixture(FakeSource::failing());
        pin(&f, "9001", "T-Centralen", t0());

        f.scheduler.refresh(t0()).await;
        f.source.set_failing(false);
        let out = f.scheduler.refresh(t0() + secs(30)).await;

        assert_eq!(out.source, RefreshSource::Fetched);
        assert!(out.entry.error.is_none());
    }

    #[tokio::test]
    async fn pinning_another_station_invalidates_slot() {
        let f = fixture(FakeSource::new(recorded_metro()));
        pin(&f, "9001", "T-Centralen", t0());
        f.scheduler.refresh(t0()).await;

        pin(&f, "9117", "Odenplan", t0() + secs(1));
        let out = f.scheduler.refresh(t0() + secs(5)).await;

        assert_eq!(out.source, RefreshSource::Fetched);
        assert_eq!(out.entry.station_name.as_deref(), Some("Odenplan"));
        assert_eq!(f.source.calls(), 2);
    }

    #[tokio::test]
    async fn repeated_late_invocations_are_idempotent() {
        let f = fixture(FakeSource::new(recorded_metro()));
        pin(&f, "9001", "T-Centralen", t0());

        let now = t0() + secs(600);
        let a = f.scheduler.refresh(now).await;
        let b = f.scheduler.refresh(now).await;

        assert_eq!(a.entry, b.entry);
        assert_eq!(a.next_refresh, b.next_refresh);
        assert_eq!(f.source.calls(), 1);
    }

    #[tokio::test]
    async fn overlapping_refreshes_fetch_once() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let source = Arc::new(FakeSource::gated(
            recorded_metro(),
            Gate {
                started: Arc::clone(&started),
                release: Arc::clone(&release),
            },
        ));
        let store = Arc::new(MemoryStore::new());
        PinStore::new(Arc::clone(&store))
            .pin_at("9001", "T-Centralen", t0())
            .unwrap();
        let scheduler = Arc::new(RefreshScheduler::new(
            store,
            Arc::clone(&source),
            RefreshConfig::default(),
        ));

        let first = tokio::spawn({
            let scheduler = Arc::clone(&scheduler);
            async move { scheduler.refresh(t0()).await }
        });
        started.notified().await;

        let second = tokio::spawn({
            let scheduler = Arc::clone(&scheduler);
            async move { scheduler.refresh(t0()).await }
        });
        tokio::task::yield_now().await;
        release.notify_one();

        let first = first.await.unwrap();
        let second = second.await.unwrap();
        assert_eq!(first.source, RefreshSource::Fetched);
        assert_eq!(second.source, RefreshSource::Cached);
        assert_eq!(second.entry, first.entry);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn corrupt_pins_read_as_none() {
        let f = fixture(FakeSource::new(recorded_metro()));
        f.store
            .set(crate::pins::PINNED_STATIONS_KEY, b"not json")
            .unwrap();

        let out = f.scheduler.refresh(t0()).await;
        assert_eq!(out.source, RefreshSource::NoPinnedStation);
        assert_eq!(f.source.calls(), 0);
    }

    #[test]
    fn refresh_serialises_camel_case() {
        let out = Refresh {
            entry: CacheEntry::failed(None, NO_PINNED_STATIONS, t0()),
            source: RefreshSource::NoPinnedStation,
            next_refresh: t0() + secs(30),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["source"], "NoPinnedStation");
        assert!(json["nextRefresh"].is_string());
        assert_eq!(json["entry"]["error"], NO_PINNED_STATIONS);
    }
}
