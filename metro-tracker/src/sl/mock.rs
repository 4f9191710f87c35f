//! Mock SL client for running without API access.
//!
//! Loads recorded departure responses from JSON files and serves them as
//! if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::SiteId;

use super::client::{decode_departures, site_for};
use super::error::SlError;
use super::source::DepartureSource;
use super::types::MetroDepartures;

/// Mock SL client that serves data from JSON files.
///
/// Bodies are kept as raw text and decoded on every fetch, so each fetch
/// yields fresh departure ids and a malformed recording surfaces as a
/// decode failure, the same as it would from the live API.
#[derive(Clone)]
pub struct MockSlClient {
    /// Recorded response bodies, keyed by site id.
    bodies: Arc<RwLock<HashMap<SiteId, String>>>,
}

impl MockSlClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{siteId}.json` (e.g. `9001.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, SlError> {
        let bodies = load_dir(data_dir.as_ref())?;
        Ok(Self {
            bodies: Arc::new(RwLock::new(bodies)),
        })
    }

    /// Create a mock client from in-memory bodies.
    pub fn from_bodies(bodies: impl IntoIterator<Item = (SiteId, String)>) -> Self {
        Self {
            bodies: Arc::new(RwLock::new(bodies.into_iter().collect())),
        }
    }

    /// List available sites in the mock data.
    pub async fn available_sites(&self) -> Vec<SiteId> {
        let bodies = self.bodies.read().await;
        let mut sites: Vec<_> = bodies.keys().cloned().collect();
        sites.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        sites
    }

    /// Reload mock data from disk.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), SlError> {
        let fresh = load_dir(data_dir.as_ref())?;
        let mut bodies = self.bodies.write().await;
        *bodies = fresh;
        Ok(())
    }
}

impl DepartureSource for MockSlClient {
    async fn fetch(&self, station_name: &str) -> Result<MetroDepartures, SlError> {
        let site = site_for(station_name)?;
        let bodies = self.bodies.read().await;

        let body = bodies.get(&site).ok_or_else(|| SlError::Transport {
            status: Some(404),
            message: format!("no mock data for site {site}"),
        })?;

        let metro = MetroDepartures::from(decode_departures(body)?);
        debug!(
            station = station_name,
            %site,
            metro = metro.departures.len(),
            "served mock departures"
        );
        Ok(metro)
    }
}

fn load_dir(data_dir: &Path) -> Result<HashMap<SiteId, String>, SlError> {
    let mut bodies = HashMap::new();

    let entries = std::fs::read_dir(data_dir).map_err(|e| SlError::InvalidRequest {
        message: format!("failed to read mock data directory {:?}: {e}", data_dir),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| SlError::InvalidRequest {
            message: format!("failed to read directory entry: {e}"),
        })?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        // "9001.json" -> "9001"
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SlError::InvalidRequest {
                message: format!("invalid filename: {:?}", path),
            })?;

        let site = SiteId::parse(stem).map_err(|_| SlError::InvalidRequest {
            message: format!("invalid site id in filename: {stem}"),
        })?;

        let body = std::fs::read_to_string(&path).map_err(|e| SlError::InvalidRequest {
            message: format!("failed to read {:?}: {e}", path),
        })?;

        bodies.insert(site, body);
    }

    if bodies.is_empty() {
        return Err(SlError::InvalidRequest {
            message: format!("no mock site files found in {:?}", data_dir),
        });
    }

    Ok(bodies)
}
