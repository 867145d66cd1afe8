//! Connection settings shared by every request.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.imperva.com";

pub const ENV_API_ID: &str = "INCAPSULA_API_ID";
pub const ENV_API_KEY: &str = "INCAPSULA_API_KEY";
pub const ENV_BASE_URL: &str = "INCAPSULA_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "INCAPSULA_TIMEOUT_SECS";

/// Base URL plus the `api_id` / `api_key` credential pair.
///
/// Immutable once built. The key is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_id: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;

        let api_id = api_id.into();
        if api_id.is_empty() {
            return Err(ConfigError::Missing(ENV_API_ID));
        }
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::Missing(ENV_API_KEY));
        }

        Ok(Self {
            base_url,
            api_id,
            api_key,
            timeout: None,
        })
    }

    /// Timeout applied by the transport to each whole round trip.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_id = lookup(ENV_API_ID).ok_or(ConfigError::Missing(ENV_API_ID))?;
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let config = Self::new(base_url, api_id, api_key)?;
        match lookup(ENV_TIMEOUT_SECS) {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidTimeout { value, source })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_id(&self) -> &str {
        &self.api_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_id", &self.api_id)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
