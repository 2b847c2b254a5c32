//! Client configuration

use std::time::Duration;

use crate::ClientError;

/// Connection settings for the marketplace backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://project.supabase.co")
    pub base_url: String,

    /// Public API key, sent as `apikey` and as the bearer token
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: 30,
        }
    }

    /// Load from the environment
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | RENTAL_API_URL | (required) |
    /// | RENTAL_API_KEY | (none) |
    /// | RENTAL_API_TIMEOUT_SECS | 30 |
    pub fn from_env() -> Result<Self, ClientError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let base_url = lookup("RENTAL_API_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClientError::Config("RENTAL_API_URL is not set".into()))?;

        let mut config = Self::new(base_url.trim());
        if let Some(key) = lookup("RENTAL_API_KEY").filter(|k| !k.trim().is_empty()) {
            config = config.with_api_key(key.trim());
        }
        if let Some(raw) = lookup("RENTAL_API_TIMEOUT_SECS") {
            let seconds = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!(
                    "RENTAL_API_TIMEOUT_SECS: expected a number, got '{raw}'"
                ))
            })?;
            config = config.with_timeout(seconds);
        }
        Ok(config)
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Create a REST client from this configuration
    pub fn build_client(&self) -> Result<super::RestClient, ClientError> {
        super::RestClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321")
    }
}
