//! SL departures HTTP client.
//!
//! Fetches live departures for a site and narrows them to the metro.

use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use crate::domain::SiteId;
use crate::stations;

use super::error::SlError;
use super::source::DepartureSource;
use super::types::{DeparturesResponse, MetroDepartures};

/// Default base URL for the SL transport API.
const DEFAULT_BASE_URL: &str = "https://transport.integration.sl.se/v1";

/// Default forecast window in minutes.
///
/// The feed interleaves every mode serving a site, so a short window can
/// come back with no metro entries even when a train is minutes away.
const DEFAULT_FORECAST_MINS: u32 = 480;

/// How much of a malformed body to keep for diagnostics.
const BODY_SNIPPET_LEN: usize = 500;

/// Configuration for the SL client.
#[derive(Debug, Clone)]
pub struct SlConfig {
    /// Base URL for the API (defaults to production SL)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Forecast window passed as `?forecast=`
    pub forecast_mins: u32,
}

impl SlConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            forecast_mins: DEFAULT_FORECAST_MINS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the forecast window.
    pub fn with_forecast(mut self, mins: u32) -> Self {
        self.forecast_mins = mins;
        self
    }
}

impl Default for SlConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// SL departures API client.
///
/// Every call performs exactly one outbound request. Nothing is cached
/// here; freshness is the caller's concern.
#[derive(Debug, Clone)]
pub struct SlClient {
    http: reqwest::Client,
    base_url: String,
    forecast_mins: u32,
}

impl SlClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SlConfig) -> Result<Self, SlError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            forecast_mins: config.forecast_mins,
        })
    }

    /// Build the departures URL for a site.
    pub fn departures_url(&self, site: &SiteId) -> Result<Url, SlError> {
        let mut url = Url::parse(&format!("{}/sites/{}/departures", self.base_url, site))
            .map_err(|e| SlError::InvalidRequest {
                message: format!("cannot build URL from base {:?}: {e}", self.base_url),
            })?;

        url.query_pairs_mut()
            .append_pair("forecast", &self.forecast_mins.to_string());

        Ok(url)
    }

    /// Get every departure at a site, all transport modes, upstream order.
    pub async fn get_site_departures(&self, site: &SiteId) -> Result<DeparturesResponse, SlError> {
        let url = self.departures_url(site)?;
        debug!(%site, %url, "requesting departures");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%site, status = status.as_u16(), "departures request failed");
            return Err(SlError::Transport {
                status: Some(status.as_u16()),
                message: body.chars().take(BODY_SNIPPET_LEN).collect(),
            });
        }

        let body = response.text().await?;
        decode_departures(&body)
    }

    /// Fetch metro departures for a station by display name.
    ///
    /// Resolves the name (unknown names fall back to T-Centralen), fetches
    /// the site, and drops every non-metro departure. The result is in
    /// upstream order, unsorted. Site-wide deviations are kept as they are.
    pub async fn fetch_metro_departures(
        &self,
        station_name: &str,
    ) -> Result<MetroDepartures, SlError> {
        let site = site_for(station_name)?;
        let response = self.get_site_departures(&site).await?;
        let total = response.departures.len();
        let metro = MetroDepartures::from(response);

        debug!(
            station = station_name,
            %site,
            total,
            metro = metro.departures.len(),
            notices = metro.stop_deviations.len(),
            "fetched departures"
        );

        Ok(metro)
    }
}

impl DepartureSource for SlClient {
    async fn fetch(&self, station_name: &str) -> Result<MetroDepartures, SlError> {
        self.fetch_metro_departures(station_name).await
    }
}

/// Resolve a station name to a validated site id.
pub(super) fn site_for(station_name: &str) -> Result<SiteId, SlError> {
    let raw = stations::resolve(station_name);
    SiteId::parse(raw).map_err(|e| SlError::InvalidRequest {
        message: format!("station {station_name:?} resolved to {raw:?}: {e}"),
    })
}

/// Decode a departures response body.
pub(super) fn decode_departures(body: &str) -> Result<DeparturesResponse, SlError> {
    serde_json::from_str(body).map_err(|e| SlError::Decode {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_LEN).collect()),
    })
}
