//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;

use crate::deeplink::DeepLink;
use crate::stations;

use super::dto::*;
use super::error::WebError;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(search_stations))
        .route("/departures/:station", get(departures))
        .route("/open", get(open_link))
        .route("/pins", get(list_pins).post(add_pin))
        .route("/pins/:id", delete(remove_pin))
        .route("/widget", get(widget))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stations by name fragment.
async fn search_stations(Query(req): Query<StationSearchRequest>) -> Json<StationSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    Json(StationSearchResponse {
        stations: stations::search(&req.q, limit),
    })
}

/// Live departures for a station. Always hits the network.
async fn departures(
    State(state): State<AppState>,
    Path(station): Path<String>,
) -> Result<Json<BoardResponse>, WebError> {
    live_board(&state, &station).await
}

/// Open an `sltracker://station/<name>` link.
async fn open_link(
    State(state): State<AppState>,
    Query(req): Query<OpenLinkRequest>,
) -> Result<Json<BoardResponse>, WebError> {
    let link = DeepLink::parse(&req.url)?;
    live_board(&state, link.station_name()).await
}

async fn live_board(state: &AppState, station: &str) -> Result<Json<BoardResponse>, WebError> {
    let entry = state
        .live
        .refresh(station, state.now())
        .await
        .ok_or(WebError::Busy)?;

    if let Some(error) = &entry.error {
        return Err(WebError::Upstream(error.clone()));
    }

    Ok(Json(BoardResponse::new(station, &entry)))
}

async fn list_pins(State(state): State<AppState>) -> Result<Json<PinsResponse>, WebError> {
    Ok(Json(PinsResponse {
        pins: state.pins.list()?,
    }))
}

/// Pin a station by name. 201 if newly pinned, 200 if it already was.
async fn add_pin(
    State(state): State<AppState>,
    Json(req): Json<PinRequest>,
) -> Result<(StatusCode, Json<PinsResponse>), WebError> {
    let name = req.name.trim();
    if !stations::is_known(name) {
        return Err(WebError::BadRequest(format!("unknown station: {name:?}")));
    }

    let inserted = state
        .pins
        .pin_at(stations::resolve(name), name, state.now())?;
    let status = if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(PinsResponse {
            pins: state.pins.list()?,
        }),
    ))
}

async fn remove_pin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, WebError> {
    if state.pins.unpin(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(WebError::NotFound(format!("station {id} is not pinned")))
    }
}

/// One widget refresh: cached if fresh, otherwise fetched.
async fn widget(State(state): State<AppState>) -> Json<WidgetResponse> {
    let refresh = state.widget.refresh(state.now()).await;
    Json(WidgetResponse::from_refresh(&refresh))
}
