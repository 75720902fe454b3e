//! Application configuration
//!
//! Central location for configuration constants and the runtime
//! configuration resolved once at process start.

use crate::error::{AppError, Result};
use std::time::Duration;

// ===== Backend =====

/// Backend address used when `ANAMNESIS_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Path of the anamnesis collection on the backend
pub const ANAMNESIS_RESOURCE: &str = "anamnesis";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the backend address
pub const API_URL_ENV: &str = "ANAMNESIS_API_URL";

/// Environment variable overriding the request timeout
pub const REQUEST_TIMEOUT_ENV: &str = "ANAMNESIS_REQUEST_TIMEOUT_SECS";

// ===== List View =====

/// Quiescence window before a search term is applied to the list
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(600);

/// Page sizes offered by the list view
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Rows per page when the list view opens
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Runtime configuration, resolved once at startup and passed into
/// [`crate::app::setup`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    base_url: String,
    request_timeout: Duration,
}

impl AppConfig {
    /// Create a validated configuration.
    ///
    /// The base URL must be an `http` or `https` address; a trailing
    /// slash is stripped so paths can be joined with `/`.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let base_url: String = base_url.into();
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(AppError::Config("base URL cannot be empty".into()));
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "base URL must start with http:// or https://, got {}",
                base_url
            )));
        }

        if request_timeout.is_zero() {
            return Err(AppError::Config(
                "request timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            base_url,
            request_timeout,
        })
    }

    /// Resolve configuration from the process environment, falling back
    /// to the defaults above.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match std::env::var(REQUEST_TIMEOUT_ENV) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("{} must be a whole number of seconds", REQUEST_TIMEOUT_ENV))
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// URL of the anamnesis collection
    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, ANAMNESIS_RESOURCE)
    }

    /// URL of a single anamnesis form
    pub fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_joined_without_double_slash() {
        let config = AppConfig::new("http://localhost:5001/", Duration::from_secs(5)).unwrap();

        assert_eq!(config.base_url(), "http://localhost:5001");
        assert_eq!(config.collection_url(), "http://localhost:5001/anamnesis");
        assert_eq!(config.item_url(42), "http://localhost:5001/anamnesis/42");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(AppConfig::new("  ", Duration::from_secs(5)).is_err());
        assert!(AppConfig::new("localhost:5001", Duration::from_secs(5)).is_err());
        assert!(AppConfig::new("http://localhost", Duration::ZERO).is_err());
    }

    #[test]
    fn test_default_points_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.collection_url(), "http://localhost:5001/anamnesis");
        assert!(PAGE_SIZE_OPTIONS.contains(&DEFAULT_PAGE_SIZE));
    }
}
