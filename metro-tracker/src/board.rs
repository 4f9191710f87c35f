//! Departure board projection.
//!
//! Turns the raw metro departures of one fetch into what a board shows:
//! nothing that has already left, soonest first.

use chrono::{DateTime, Utc};

use crate::sl::Departure;

/// Drop departed trains and order the rest by expected time.
///
/// - A departure whose `expected` time is strictly before `now` is dropped.
/// - The rest are sorted ascending by `expected`; ties keep upstream order.
/// - An `expected` that fails to parse counts as `now`: it is kept and sorts
///   ahead of everything later.
///
/// The list is not truncated; how many rows to show is up to the caller.
pub fn project(departures: Vec<Departure>, now: DateTime<Utc>) -> Vec<Departure> {
    let mut upcoming: Vec<(DateTime<Utc>, Departure)> = departures
        .into_iter()
        .filter_map(|d| {
            let at = d.expected_at().unwrap_or(now);
            (at >= now).then_some((at, d))
        })
        .collect();

    // sort_by_key is stable
    upcoming.sort_by_key(|(at, _)| *at);

    upcoming.into_iter().map(|(_, d)| d).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{format_local, parse_local};
    use crate::sl::{DepartureId, Journey, Line, StopArea, StopPoint, TransportMode};
    use chrono::Duration;
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        parse_local("2025-01-27T10:00:00").unwrap()
    }

    /// Departure whose `destination` records its input position.
    fn departure(index: usize, expected: String) -> Departure {
        Departure {
            id: DepartureId::next(),
            direction: String::new(),
            direction_code: 1,
            destination: index.to_string(),
            state: "EXPECTED".to_string(),
            scheduled: expected.clone(),
            expected,
            display: String::new(),
            journey: Journey {
                id: index as i64,
                state: "EXPECTED".to_string(),
                prediction_state: None,
            },
            stop_area: StopArea {
                id: 1,
                name: String::new(),
                area_type: "METROSTN".to_string(),
            },
            stop_point: StopPoint {
                id: 1,
                name: String::new(),
                designation: None,
            },
            line: Line {
                id: 13,
                designation: "13".to_string(),
                transport_authority_id: 1,
                transport_mode: TransportMode::Metro,
                group_of_lines: None,
            },
            deviations: None,
        }
    }

    fn build(offsets: &[i64]) -> Vec<Departure> {
        offsets
            .iter()
            .enumerate()
            .map(|(i, mins)| departure(i, format_local(base() + Duration::minutes(*mins))))
            .collect()
    }

    proptest! {
        /// Exactly the departures at or after `now` survive
        #[test]
        fn pruning_matches_threshold(
            offsets in prop::collection::vec(-60i64..60, 0..30),
            now_offset in -30i64..30,
        ) {
            let now = base() + Duration::minutes(now_offset);
            let out = project(build(&offsets), now);

            let expected = offsets.iter().filter(|m| **m >= now_offset).count();
            prop_assert_eq!(out.len(), expected);
            prop_assert!(out.iter().all(|d| d.expected_at().unwrap() >= now));
        }

        /// Output is non-decreasing by expected time, and equal times keep
        /// their input order
        #[test]
        fn sorted_and_stable(offsets in prop::collection::vec(0i64..10, 0..30)) {
            let out = project(build(&offsets), base());

            for pair in out.windows(2) {
                let a = pair[0].expected_at().unwrap();
                let b = pair[1].expected_at().unwrap();
                prop_assert!(a <= b);
                if a == b {
                    let ia: usize = pair[0].destination.parse().unwrap();
                    let ib: usize = pair[1].destination.parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }
    }
}
