use std::path::PathBuf;
use std::time::Duration;

use dotenv::dotenv;
use url::Url;

use crate::error::{DashboardError, Result};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub html_report_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load `.env` and read the process environment. Values are not
    /// checked here; call [`Config::validate`] once overrides are applied.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. `from_env` passes the
    /// process environment; tests pass a map. Unparsable numbers fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Config {
            api_base_url: get("API_BASE")
                .or_else(|| get("API_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            poll_interval: Duration::from_millis(
                get("POLL_INTERVAL_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
            request_timeout: Duration::from_secs(
                get("REQUEST_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            html_report_path: get("HTML_REPORT_PATH").map(PathBuf::from),
            log_format: match get("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            DashboardError::Config(format!("API_BASE '{}' is not a valid URL: {}", self.api_base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DashboardError::Config(format!(
                "API_BASE must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(DashboardError::Config("POLL_INTERVAL_MS must be positive".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(DashboardError::Config("REQUEST_TIMEOUT_SECS must be positive".into()));
        }
        Ok(())
    }
}
