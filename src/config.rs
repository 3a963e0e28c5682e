//! API client configuration parsed from environment variables.
//!
//! Browser builds have no process environment, so each variable is also
//! read at compile time through `option_env!` as a second source.

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

const API_URL_VAR: &str = "DASHBOARD_API_URL";
const API_TIMEOUT_VAR: &str = "DASHBOARD_API_TIMEOUT_SECS";
const REGION_FALLBACK_VAR: &str = "DASHBOARD_REGION_FALLBACK";

/// Errors produced while reading client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but its value could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to, without trailing `/`.
    pub base_url: String,
    /// Per-request timeout enforced by the transport.
    pub timeout_secs: u64,
    /// Use the built-in sample province list when the region fetch fails.
    pub region_fallback: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_URL.to_owned(), timeout_secs: DEFAULT_API_TIMEOUT_SECS, region_fallback: true }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `DASHBOARD_API_URL`: default `http://localhost:8000/api`
    /// - `DASHBOARD_API_TIMEOUT_SECS`: default 10
    /// - `DASHBOARD_REGION_FALLBACK`: `true`/`false`/`1`/`0`, default `true`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric or boolean variable
    /// holds an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_build(API_URL_VAR, option_env!("DASHBOARD_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let timeout_secs = match env_or_build(API_TIMEOUT_VAR, option_env!("DASHBOARD_API_TIMEOUT_SECS")) {
            Some(raw) => parse_u64(API_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_API_TIMEOUT_SECS,
        };

        let region_fallback = match env_or_build(REGION_FALLBACK_VAR, option_env!("DASHBOARD_REGION_FALLBACK")) {
            Some(raw) => parse_bool(REGION_FALLBACK_VAR, &raw)?,
            None => true,
        };

        Ok(Self { base_url, timeout_secs, region_fallback })
    }

    /// Join an endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn env_or_build(var: &str, build_time: Option<&'static str>) -> Option<String> {
    std::env::var(var)
        .ok()
        .or_else(|| build_time.map(str::to_owned))
        .filter(|v| !v.trim().is_empty())
}

fn parse_u64(var: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid { var: var.to_owned(), value: raw.to_owned() })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid { var: var.to_owned(), value: raw.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
