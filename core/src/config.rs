//! Client configuration.
//!
//! # Design
//! `ClientConfig` is a plain value: built once, handed to the client by value,
//! never mutated afterwards. Every field has a named default so a bare
//! `ClientConfig::default()` talks to the public API with the library's own
//! user agent and no token.

use std::time::Duration;

use crate::error::ConfigError;

/// Versioned root of the public API.
pub const DEFAULT_BASE_URL: &str = "https://azurlane-api.appspot.com/v2";

/// User agent sent when the caller does not supply one.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "azurlane-core/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/azurlane-api)"
);

/// Upper bound for connect plus full response read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_BASE_URL: &str = "AZURLANE_BASE_URL";
pub const ENV_USER_AGENT: &str = "AZURLANE_USER_AGENT";
pub const ENV_TOKEN: &str = "AZURLANE_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "AZURLANE_TIMEOUT_SECS";

/// Options attached to every outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    user_agent: String,
    token: Option<String>,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with the `AZURLANE_*` environment variables.
    ///
    /// Unset or empty variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(base_url) = var(ENV_BASE_URL) {
            config = config.with_base_url(&base_url);
        }
        if let Some(user_agent) = var(ENV_USER_AGENT) {
            config = config.with_user_agent(user_agent);
        }
        if let Some(token) = var(ENV_TOKEN) {
            config = config.with_token(token);
        }
        if let Some(raw) = var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the value sent in the `Authorization` header. An empty token is
    /// treated as no token and the header is omitted.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
