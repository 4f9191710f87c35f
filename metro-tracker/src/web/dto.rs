//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::CacheEntry;
use crate::deeplink::DeepLink;
use crate::domain::LineColour;
use crate::pins::PinnedStation;
use crate::refresh::{Refresh, RefreshSource};
use crate::sl::Departure;
use crate::stations::{self, Station};

/// Rows shown by the widget.
pub const WIDGET_ROWS: usize = 3;

/// Query for station search.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Search text (name fragment)
    #[serde(default)]
    pub q: String,

    /// Max results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<Station>,
}

/// Query for opening a deep link.
#[derive(Debug, Deserialize)]
pub struct OpenLinkRequest {
    pub url: String,
}

/// Body for pinning a station.
#[derive(Debug, Deserialize)]
pub struct PinRequest {
    pub name: String,
}

/// Current pin list.
#[derive(Debug, Serialize)]
pub struct PinsResponse {
    pub pins: Vec<PinnedStation>,
}

/// One departure row.
#[derive(Debug, Serialize)]
pub struct DepartureView {
    pub line: String,
    pub line_colour: LineColour,
    pub destination: String,
    pub direction_code: i32,
    /// Countdown text from upstream ("Nu", "3 min", "10:42")
    pub display: String,
    pub expected: String,
    pub scheduled: String,
    pub state: String,
    /// Platform letter or number, where upstream gives one
    pub platform: Option<String>,
    pub deviations: Vec<String>,
}

impl DepartureView {
    pub fn from_departure(d: &Departure) -> Self {
        Self {
            line: d.line.designation.clone(),
            line_colour: LineColour::for_designation(&d.line.designation),
            destination: d.destination.clone(),
            direction_code: d.direction_code,
            display: d.display.clone(),
            expected: d.expected.clone(),
            scheduled: d.scheduled.clone(),
            state: d.state.clone(),
            platform: d.stop_point.designation.clone(),
            deviations: d
                .deviations
                .iter()
                .flatten()
                .map(|dev| dev.message.clone())
                .collect(),
        }
    }
}

/// Live departures for one station.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub station_name: String,
    pub site_id: &'static str,
    pub produced_at: DateTime<Utc>,
    pub departures: Vec<DepartureView>,
    /// Site-wide notices, e.g. a broken lift
    pub notices: Vec<String>,
    /// Link that reopens this board
    pub link: String,
}

impl BoardResponse {
    pub fn new(station_name: &str, entry: &CacheEntry) -> Self {
        Self {
            station_name: station_name.to_string(),
            site_id: stations::resolve(station_name),
            produced_at: entry.produced_at,
            departures: entry
                .departures
                .iter()
                .map(DepartureView::from_departure)
                .collect(),
            notices: notices(entry),
            link: DeepLink::station(station_name).to_string(),
        }
    }
}

/// What the widget should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    Departures,
    NoDepartures,
    Error,
}

/// Widget content plus when to ask again.
#[derive(Debug, Serialize)]
pub struct WidgetResponse {
    pub state: WidgetState,
    pub station_name: Option<String>,
    pub departures: Vec<DepartureView>,
    pub notices: Vec<String>,
    pub error: Option<String>,
    pub source: RefreshSource,
    pub produced_at: DateTime<Utc>,
    pub next_refresh: DateTime<Utc>,
    /// Link that opens the station in the app
    pub link: Option<String>,
}

impl WidgetResponse {
    pub fn from_refresh(refresh: &Refresh) -> Self {
        let entry = &refresh.entry;
        let state = if !entry.departures.is_empty() && entry.station_name.is_some() {
            WidgetState::Departures
        } else if entry.error.is_some() {
            WidgetState::Error
        } else {
            WidgetState::NoDepartures
        };

        Self {
            state,
            station_name: entry.station_name.clone(),
            departures: entry
                .departures
                .iter()
                .take(WIDGET_ROWS)
                .map(DepartureView::from_departure)
                .collect(),
            notices: notices(entry),
            error: entry.error.clone(),
            source: refresh.source,
            produced_at: entry.produced_at,
            next_refresh: refresh.next_refresh,
            link: entry
                .station_name
                .as_deref()
                .map(|name| DeepLink::station(name).to_string()),
        }
    }
}

fn notices(entry: &CacheEntry) -> Vec<String> {
    entry
        .stop_deviations
        .iter()
        .map(|dev| dev.message.clone())
        .collect()
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
