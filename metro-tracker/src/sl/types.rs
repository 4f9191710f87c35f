//! SL departures API response DTOs.
//!
//! These types map directly to the JSON returned by
//! `GET /sites/{siteId}/departures`. Field names already match the wire
//! format (snake_case), so no renames are needed except where the upstream
//! uses a Rust keyword.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::parse_local;

/// Response from `GET /sites/{siteId}/departures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeparturesResponse {
    /// Upcoming departures of every transport mode, in upstream order.
    pub departures: Vec<Departure>,

    /// Disruption notices affecting the site as a whole.
    #[serde(default)]
    pub stop_deviations: Option<Vec<StopDeviation>>,
}

/// The metro part of one site's response.
#[derive(Debug, Clone, PartialEq)]
pub struct MetroDepartures {
    /// Metro departures only, in upstream order.
    pub departures: Vec<Departure>,

    /// Site-wide notices, whatever mode they concern.
    pub stop_deviations: Vec<StopDeviation>,
}

/// Synthetic identity for a decoded departure.
///
/// Assigned from a process-wide counter when a departure is decoded from
/// the upstream API. Two fetches of the same real-world departure get
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartureId(u64);

impl DepartureId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        DepartureId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A single upcoming departure from a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    /// Synthetic id. Absent upstream; kept when re-read from the cache.
    #[serde(default = "DepartureId::next")]
    pub id: DepartureId,

    /// Direction text (usually the terminus).
    pub direction: String,

    /// Direction code (1 or 2 on the metro).
    pub direction_code: i32,

    /// Destination shown on the train.
    pub destination: String,

    /// Departure state, e.g. `EXPECTED`, `ATSTOP`, `CANCELLED`.
    pub state: String,

    /// Timetabled departure, naive local time (`YYYY-MM-DDTHH:MM:SS`).
    pub scheduled: String,

    /// Predicted departure, naive local time.
    pub expected: String,

    /// Pre-formatted countdown from upstream, e.g. `"Nu"`, `"3 min"`, `"10:42"`.
    pub display: String,

    pub journey: Journey,

    pub stop_area: StopArea,

    pub stop_point: StopPoint,

    pub line: Line,

    /// Service deviations for this departure.
    #[serde(default)]
    pub deviations: Option<Vec<Deviation>>,
}

impl Departure {
    /// Whether this departure is served by the metro.
    pub fn is_metro(&self) -> bool {
        self.line.transport_mode == TransportMode::Metro
    }

    /// The expected departure as a UTC instant, if it parses.
    pub fn expected_at(&self) -> Option<DateTime<Utc>> {
        parse_local(&self.expected)
    }

    /// The scheduled departure as a UTC instant, if it parses.
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        parse_local(&self.scheduled)
    }
}

/// Journey (vehicle run) information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub id: i64,
    pub state: String,
    pub prediction_state: Option<String>,
}

/// Stop area (a platform group within the site).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopArea {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub area_type: String,
}

/// Stop point (a single platform or bay).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopPoint {
    pub id: i64,
    pub name: String,
    pub designation: Option<String>,
}

/// Line information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: i64,

    /// Public line number, e.g. `"13"`.
    pub designation: String,

    pub transport_authority_id: i64,

    pub transport_mode: TransportMode,

    /// Line family, e.g. `"tunnelbanans röda linje"`.
    pub group_of_lines: Option<String>,
}

/// Transport mode of a line.
///
/// The departures feed interleaves every mode serving a site. Modes this
/// crate does not know decode as [`TransportMode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Metro,
    Bus,
    Tram,
    Train,
    Ship,
    Ferry,
    Taxi,
    #[serde(other)]
    Other,
}

/// Deviation attached to a single departure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub importance_level: i32,
    pub consequence: Option<String>,
    pub message: String,
}

/// Deviation affecting the whole site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopDeviation {
    pub id: Option<i64>,
    pub importance_level: i32,
    pub message: String,
    pub scope: Option<DeviationScope>,
}

/// What a stop deviation applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationScope {
    pub lines: Option<Vec<Line>>,
    pub stop_areas: Option<Vec<StopArea>>,
    pub stop_points: Option<Vec<StopPoint>>,
}
