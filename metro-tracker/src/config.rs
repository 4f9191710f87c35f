//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::refresh::RefreshConfig;
use crate::sl::SlConfig;

/// Default directory for the shared store.
pub const DEFAULT_STORE_DIR: &str = "./metro-store";

/// Default HTTP listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Everything the binary needs to start either context.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sl: SlConfig,

    /// Directory shared by the app and the widget.
    pub store_dir: PathBuf,

    pub bind_addr: SocketAddr,

    /// Serve recorded responses from this directory instead of the live API.
    pub mock_data: Option<PathBuf>,

    pub refresh: RefreshConfig,
}

impl AppConfig {
    /// Read from the process environment.
    ///
    /// - `SL_BASE_URL`: API base URL
    /// - `SL_TIMEOUT_SECS`: request timeout
    /// - `METRO_STORE_DIR`: shared store directory
    /// - `METRO_BIND_ADDR`: HTTP listen address
    /// - `METRO_MOCK_DATA`: directory of `{siteId}.json` recordings
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read using `lookup` in place of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut sl = SlConfig::new();
        if let Some(url) = get("SL_BASE_URL") {
            sl = sl.with_base_url(url);
        }
        if let Some(raw) = get("SL_TIMEOUT_SECS") {
            let secs = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "SL_TIMEOUT_SECS",
                expected: "number of seconds",
                value: raw.clone(),
            })?;
            sl = sl.with_timeout(secs);
        }

        let bind_raw = get("METRO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: "METRO_BIND_ADDR",
            expected: "socket address",
            value: bind_raw.clone(),
        })?;

        Ok(Self {
            sl,
            store_dir: get("METRO_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR)),
            bind_addr,
            mock_data: get("METRO_MOCK_DATA").map(PathBuf::from),
            refresh: RefreshConfig::default(),
        })
    }
}
