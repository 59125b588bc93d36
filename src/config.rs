//! Configuration management for wicket.
//!
//! This module handles the environment fallback for the ticket endpoint
//! and API key. Values supplied in the parameter document always win;
//! the environment only fills gaps, so automation can keep the secret
//! out of the document entirely.

use crate::error::WicketError;
use std::env;
use url::Url;

/// Environment variable holding the osTicket base URL.
pub const ENV_URL: &str = "OSTICKET_URL";

/// Environment variable holding the osTicket API key.
pub const ENV_API_KEY: &str = "OSTICKET_API_KEY";

/// Optional connection settings read from the environment.
///
/// Both fields may be absent; required-parameter validation happens after
/// the merge with the parameter document. The API key is stored but never
/// logged or exposed in error messages.
#[derive(Clone, Default)]
pub struct Config {
    /// Base URL for the osTicket instance (e.g., `https://osticket.example.com`).
    pub url: Option<String>,

    /// API key for authentication.
    /// This value must never be logged or included in error messages.
    pub api_key: Option<String>,
}

impl Config {
    /// Loads fallback configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `OSTICKET_URL`: Base URL of the osTicket instance (optional)
    /// - `OSTICKET_API_KEY`: API key for authentication (optional)
    ///
    /// Empty or whitespace-only values are treated as unset. A present URL
    /// is validated and normalized.
    ///
    /// # Errors
    ///
    /// Returns `WicketError::Config` if `OSTICKET_URL` is set but is not an
    /// `http://` or `https://` URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, WicketError> {
        let url = Self::get_optional_env(ENV_URL)
            .map(Self::validate_base_url)
            .transpose()?;
        let api_key = Self::get_optional_env(ENV_API_KEY);

        Ok(Config { url, api_key })
    }

    /// Gets an environment variable, treating missing and empty as unset.
    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Validates and normalizes a base URL.
    pub(crate) fn validate_base_url(url: String) -> Result<String, WicketError> {
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&url)
            .map_err(|e| WicketError::invalid_config(format!("invalid ticket URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(WicketError::invalid_config(
                "ticket URL must start with http:// or https://",
            ));
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Tests that modify environment variables should not run in parallel.
    // Use `cargo test -- --test-threads=1` for full integration tests.

    #[test]
    fn test_validate_base_url_removes_trailing_slash() {
        let result = Config::validate_base_url("https://example.com/".to_string()).unwrap();
        assert_eq!(result, "https://example.com");
    }

    #[test]
    fn test_validate_base_url_requires_scheme() {
        let result = Config::validate_base_url("example.com".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_base_url_accepts_http() {
        let result = Config::validate_base_url("http://osticket.internal".to_string()).unwrap();
        assert_eq!(result, "http://osticket.internal");
    }

    #[test]
    fn test_validate_base_url_rejects_other_schemes() {
        let result = Config::validate_base_url("ftp://osticket.example.com".to_string());
        assert!(result.is_err());
    }
}
