//! Configuration module
//!
//! The submission client is configured with the API base location and an
//! optional caller-imposed timeout. Both can be injected directly or read from
//! the environment (a `.env` file is honoured).

use std::env;
use std::time::Duration;

/// Base location of the campaign API when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/campaigns";

pub const API_URL_ENV: &str = "CAMPAIGN_API_URL";
pub const API_TIMEOUT_ENV: &str = "CAMPAIGN_API_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, without trailing slash. Endpoints are appended to it.
    pub base_url: String,
    /// Request timeout. `None` lets a submission run until the server answers.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load from `CAMPAIGN_API_URL` and `CAMPAIGN_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let base_url = lookup(API_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup(API_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("{} must be a whole number of seconds", API_TIMEOUT_ENV)
            })?;
            if secs == 0 {
                return Err(anyhow::anyhow!("{} must be greater than zero", API_TIMEOUT_ENV));
            }
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_URL_ENV, "http://api.test/campaigns/"),
            (API_TIMEOUT_ENV, "30"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://api.test/campaigns");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(ClientConfig::from_lookup(lookup_from(&[(API_TIMEOUT_ENV, "soon")])).is_err());
        assert!(ClientConfig::from_lookup(lookup_from(&[(API_TIMEOUT_ENV, "0")])).is_err());
    }

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        let config = ClientConfig::new("http://localhost:8080/api/campaigns/");
        assert_eq!(
            config.endpoint_url("/generate"),
            "http://localhost:8080/api/campaigns/generate"
        );
    }
}
