//! Client configuration parsed from environment variables.

use std::fmt;

use crate::ClientError;

pub const DEFAULT_AMIE_URL: &str = "https://amieclient.xsede.org/v0.10/";
pub const DEFAULT_USAGE_URL: &str = "https://usage.xsede.org/api/v1/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct AmieConfig {
    pub site_name: String,
    pub api_key: String,
    /// Always ends with `/`.
    pub amie_url: String,
    /// Always ends with `/`.
    pub usage_url: String,
    pub timeouts: Timeouts,
}

impl AmieConfig {
    /// Config for `site_name` against the production endpoints.
    pub fn new(site_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            api_key: api_key.into(),
            amie_url: DEFAULT_AMIE_URL.to_string(),
            usage_url: DEFAULT_USAGE_URL.to_string(),
            timeouts: Timeouts::default(),
        }
    }

    /// Point the packet client somewhere else, e.g. the test server.
    #[must_use]
    pub fn with_amie_url(mut self, url: &str) -> Self {
        self.amie_url = with_trailing_slash(url);
        self
    }

    #[must_use]
    pub fn with_usage_url(mut self, url: &str) -> Self {
        self.usage_url = with_trailing_slash(url);
        self
    }

    /// Build config from environment variables.
    ///
    /// Required:
    /// - `AMIE_SITE_NAME`
    /// - `AMIE_API_KEY`
    ///
    /// Optional:
    /// - `AMIE_URL`: production AMIE endpoint when absent
    /// - `AMIE_USAGE_URL`: production usage endpoint when absent
    /// - `AMIE_REQUEST_TIMEOUT_SECS`: default 60
    /// - `AMIE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// [`ClientError::MissingConfig`] when a required variable is unset and
    /// [`ClientError::ConfigParse`] when a timeout is not a whole number.
    pub fn from_env() -> Result<Self, ClientError> {
        let site_name = env_required("AMIE_SITE_NAME")?;
        let api_key = env_required("AMIE_API_KEY")?;
        let amie_url = std::env::var("AMIE_URL").unwrap_or_else(|_| DEFAULT_AMIE_URL.to_string());
        let usage_url = std::env::var("AMIE_USAGE_URL").unwrap_or_else(|_| DEFAULT_USAGE_URL.to_string());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("AMIE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("AMIE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self {
            site_name,
            api_key,
            amie_url: with_trailing_slash(&amie_url),
            usage_url: with_trailing_slash(&usage_url),
            timeouts,
        })
    }
}

impl fmt::Debug for AmieConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmieConfig")
            .field("site_name", &self.site_name)
            .field("api_key", &"<redacted>")
            .field("amie_url", &self.amie_url)
            .field("usage_url", &self.usage_url)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

pub(crate) fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') { url.to_string() } else { format!("{url}/") }
}

fn env_required(key: &str) -> Result<String, ClientError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ClientError::MissingConfig { var: key.into() }),
    }
}

fn env_parse_u64(key: &str, default: u64) -> Result<u64, ClientError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ClientError::ConfigParse(format!("{key}={raw}: {e}")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
