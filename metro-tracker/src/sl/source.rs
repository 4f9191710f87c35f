//! The departure-source seam.

use std::future::Future;

use super::client::SlClient;
use super::error::SlError;
use super::mock::MockSlClient;
use super::types::{Departure, DeparturesResponse, MetroDepartures};

/// Anything that can produce metro departures for a station name.
///
/// Implementations resolve the name, perform at most one upstream call and
/// return metro departures in upstream order, along with the site's stop
/// deviations. They do not cache.
pub trait DepartureSource: Send + Sync {
    fn fetch(
        &self,
        station_name: &str,
    ) -> impl Future<Output = Result<MetroDepartures, SlError>> + Send;
}

impl<T: DepartureSource> DepartureSource for std::sync::Arc<T> {
    fn fetch(
        &self,
        station_name: &str,
    ) -> impl Future<Output = Result<MetroDepartures, SlError>> + Send {
        (**self).fetch(station_name)
    }
}

/// Keep only metro departures, preserving order.
///
/// This is a hard filter: buses, trams, trains and boats sharing the site
/// are discarded entirely.
pub fn retain_metro(mut departures: Vec<Departure>) -> Vec<Departure> {
    departures.retain(Departure::is_metro);
    departures
}

impl From<DeparturesResponse> for MetroDepartures {
    fn from(response: DeparturesResponse) -> Self {
        Self {
            departures: retain_metro(response.departures),
            stop_deviations: response.stop_deviations.unwrap_or_default(),
        }
    }
}

/// Either the live API or recorded responses, chosen at startup.
#[derive(Clone)]
pub enum Upstream {
    Live(SlClient),
    Mock(MockSlClient),
}

impl DepartureSource for Upstream {
    async fn fetch(&self, station_name: &str) -> Result<MetroDepartures, SlError> {
        match self {
            Upstream::Live(client) => client.fetch(station_name).await,
            Upstream::Mock(client) => client.fetch(station_name).await,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sl::types::{Journey, Line, StopArea, StopPoint};
    use crate::sl::{DepartureId, TransportMode};
    use proptest::prelude::*;

    fn mode() -> impl Strategy<Value = TransportMode> {
        prop_oneof![
            Just(TransportMode::Metro),
            Just(TransportMode::Bus),
            Just(TransportMode::Tram),
            Just(TransportMode::Train),
            Just(TransportMode::Ship),
            Just(TransportMode::Other),
        ]
    }

    fn departure(mode: TransportMode) -> Departure {
        Departure {
            id: DepartureId::next(),
            direction: "Ropsten".to_string(),
            direction_code: 2,
            destination: "Ropsten".to_string(),
            state: "EXPECTED".to_string(),
            scheduled: "2025-01-27T10:04:00".to_string(),
            expected: "2025-01-27T10:04:00".to_string(),
            display: "Nu".to_string(),
            journey: Journey {
                id: 1,
                state: "EXPECTED".to_string(),
                prediction_state: None,
            },
            stop_area: StopArea {
                id: 1051,
                name: "T-Centralen".to_string(),
                area_type: "METROSTN".to_string(),
            },
            stop_point: StopPoint {
                id: 3051,
                name: "T-Centralen".to_string(),
                designation: None,
            },
            line: Line {
                id: 13,
                designation: "13".to_string(),
                transport_authority_id: 1,
                transport_mode: mode,
                group_of_lines: None,
            },
            deviations: None,
        }
    }

    proptest! {
        /// Output is exactly the metro entries of the input
        #[test]
        fn keeps_exactly_metro(modes in prop::collection::vec(mode(), 0..40)) {
            let input: Vec<_> = modes.iter().map(|m| departure(*m)).collect();
            let metro_count = modes.iter().filter(|m| **m == TransportMode::Metro).count();

            let out = retain_metro(input);
            prop_assert_eq!(out.len(), metro_count);
            prop_assert!(out.iter().all(|d| d.is_metro()));
        }
    }
}
