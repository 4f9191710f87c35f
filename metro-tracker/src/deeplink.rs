//! `sltracker://station/<name>` links.
//!
//! The widget links back into the app with the station it shows. The name
//! is the last path segment, percent-encoded.

use std::fmt;

use reqwest::Url;

/// URL scheme of app links.
pub const SCHEME: &str = "sltracker";

/// Host naming the station route.
const STATION_HOST: &str = "station";

/// Errors parsing a deep link.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeepLinkError {
    #[error("not a URL: {0}")]
    Malformed(String),

    #[error("unsupported link {0:?}")]
    Unsupported(String),

    #[error("link names no station")]
    MissingStation,

    #[error("station name is not valid UTF-8 after decoding")]
    InvalidEncoding,
}

/// A parsed link to a station's departures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    station_name: String,
}

impl DeepLink {
    pub fn station(name: impl Into<String>) -> Self {
        Self {
            station_name: name.into(),
        }
    }

    /// Parse `sltracker://station/<percent-encoded name>`.
    pub fn parse(link: &str) -> Result<Self, DeepLinkError> {
        let url = Url::parse(link).map_err(|e| DeepLinkError::Malformed(e.to_string()))?;

        if url.scheme() != SCHEME || url.host_str() != Some(STATION_HOST) {
            return Err(DeepLinkError::Unsupported(link.to_string()));
        }

        let raw = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();

        let name = urlencoding::decode(raw).map_err(|_| DeepLinkError::InvalidEncoding)?;
        if name.is_empty() {
            return Err(DeepLinkError::MissingStation);
        }

        Ok(Self::station(name.into_owned()))
    }

    pub fn station_name(&self) -> &str {
        &self.station_name
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SCHEME}://{STATION_HOST}/{}",
            urlencoding::encode(&self.station_name)
        )
    }
}
