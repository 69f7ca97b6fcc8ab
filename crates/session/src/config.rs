//! Session configuration.

use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the authentication backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL of the console backend, without a trailing slash.
    pub api_base_url: String,
    /// Upper bound for each backend call. Expiry surfaces as a network
    /// failure, which the login and restore paths treat as a denial.
    pub request_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SessionConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Read settings from `COVERDESK_API_URL` and
    /// `COVERDESK_API_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        let api_base_url =
            std::env::var("COVERDESK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout_secs = std::env::var("COVERDESK_API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let config = SessionConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn new_overrides_only_the_url() {
        let config = SessionConfig::new("https://api.coverdesk.example");
        assert_eq!(config.api_base_url, "https://api.coverdesk.example");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
