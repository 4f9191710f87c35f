//! Test doubles for code that consumes a [`DepartureSource`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Notify;

use super::error::SlError;
use super::source::DepartureSource;
use super::types::{Departure, DeparturesResponse, MetroDepartures, StopDeviation};

fn recorded() -> MetroDepartures {
    let body = include_str!("../../data/mock_sites/9001.json");
    let resp: DeparturesResponse = serde_json::from_str(body).unwrap();
    MetroDepartures::from(resp)
}

/// Metro departures from the recorded T-Centralen response.
pub(crate) fn recorded_metro() -> Vec<Departure> {
    recorded().departures
}

/// Site-wide notices from the recorded T-Centralen response.
pub(crate) fn recorded_stop_deviations() -> Vec<StopDeviation> {
    recorded().stop_deviations
}

/// A scripted source that counts calls and can be made to fail or block.
#[derive(Default)]
pub(crate) struct FakeSource {
    departures: Vec<Departure>,
    stop_deviations: Vec<StopDeviation>,
    calls: AtomicUsize,
    fail: AtomicBool,
    gate: Option<Gate>,
}

/// Holds a fetch open until released.
pub(crate) struct Gate {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl FakeSource {
    pub fn new(departures: Vec<Departure>) -> Self {
        Self {
            departures,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        let source = Self::default();
        source.set_failing(true);
        source
    }

    pub fn gated(departures: Vec<Departure>, gate: Gate) -> Self {
        Self {
            departures,
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_stop_deviations(mut self, stop_deviations: Vec<StopDeviation>) -> Self {
        self.stop_deviations = stop_deviations;
        self
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DepartureSource for FakeSource {
    async fn fetch(&self, _station_name: &str) -> Result<MetroDepartures, SlError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(SlError::Transport {
                status: None,
                message: "connection refused".into(),
            });
        }

        Ok(MetroDepartures {
            departures: self.departures.clone(),
            stop_deviations: self.stop_deviations.clone(),
        })
    }
}
