//! HTTP client for the osTicket web API.
//!
//! This module provides the `OsTicketClient` struct for submitting one
//! ticket-creation request. There is exactly one write endpoint,
//! `POST /api/tickets.json`; the invocation either sends the payload once
//! in full or not at all. Nothing is retried - the caller decides whether
//! to re-run the whole invocation.
//!
//! # Security
//!
//! The API key travels only in the `X-API-Key` header. It is never logged,
//! and remote error bodies are sanitized before being embedded anywhere.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::config::Config;
use crate::error::WicketError;
use crate::outcome::SubmitOutcome;
use crate::params::TicketParams;
use crate::payload;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fixed API path for ticket creation.
const TICKETS_PATH: &str = "/api/tickets.json";

/// Maximum length for HTTP error response bodies embedded in messages.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP client for the osTicket ticket-creation endpoint.
///
/// # Example
///
/// ```ignore
/// let client = OsTicketClient::from_params(&params)?;
/// let outcome = client.submit(&params, false).await?;
/// ```
#[derive(Clone)]
pub struct OsTicketClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Fully resolved ticket endpoint, including the API path.
    endpoint: String,

    /// API key for authentication.
    /// SECURITY: Never log this value!
    api_key: String,
}

impl std::fmt::Debug for OsTicketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // SECURITY: never expose the API key in debug output.
        f.debug_struct("OsTicketClient")
            .field("http", &self.http)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OsTicketClient {
    /// Creates a client for the given instance URL and API key.
    ///
    /// # Arguments
    ///
    /// * `url` - Base URL of the osTicket instance
    /// * `api_key` - API key sent in the `X-API-Key` header
    /// * `validate_certs` - Verify TLS certificates (disable only for
    ///   instances with self-signed certificates)
    ///
    /// # Errors
    ///
    /// Returns `WicketError::Config` for a URL without an http(s) scheme,
    /// or `WicketError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(url: &str, api_key: &str, validate_certs: bool) -> Result<Self, WicketError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        if !validate_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build().map_err(WicketError::HttpClient)?;

        let endpoint = Self::normalize_endpoint(url)?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    /// Creates a client from a resolved parameter set.
    ///
    /// # Errors
    ///
    /// Returns `WicketError::Validation` if `url` or `api_key` is still
    /// missing after the environment merge.
    pub fn from_params(params: &TicketParams) -> Result<Self, WicketError> {
        let url = params
            .url
            .as_deref()
            .ok_or_else(|| WicketError::missing_param("url"))?;
        let api_key = params
            .api_key
            .as_deref()
            .ok_or_else(|| WicketError::missing_param("api_key"))?;

        Self::new(url, api_key, params.validate_certs)
    }

    /// Normalizes the instance URL into the full ticket endpoint.
    ///
    /// A URL already ending in the API path is accepted unchanged.
    fn normalize_endpoint(url: &str) -> Result<String, WicketError> {
        let url = Config::validate_base_url(url.to_string())?;
        if url.ends_with(TICKETS_PATH) {
            Ok(url)
        } else {
            Ok(format!("{}{}", url, TICKETS_PATH))
        }
    }

    /// Submits one ticket, or previews the submission.
    ///
    /// Builds the payload first in both modes, so validation and encoding
    /// errors surface identically. In preview mode the network call is
    /// skipped entirely and a successful outcome is returned: the remote
    /// API offers no side-effect-free validation endpoint, so preview can
    /// only attest that the request is well-formed.
    ///
    /// # Errors
    ///
    /// Any `WicketError`; all of them are terminal for this invocation.
    pub async fn submit(
        &self,
        params: &TicketParams,
        preview: bool,
    ) -> Result<SubmitOutcome, WicketError> {
        let payload = payload::build_payload(params)?;

        if preview {
            tracing::debug!("check mode: request is well-formed, skipping submission");
            return Ok(SubmitOutcome::ok());
        }

        self.post_ticket(&payload).await?;
        Ok(SubmitOutcome::ok())
    }

    /// Sends the payload to the ticket endpoint.
    async fn post_ticket(&self, payload: &serde_json::Value) -> Result<(), WicketError> {
        tracing::debug!(endpoint = %self.endpoint, "submitting ticket");

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("X-API-Key", &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    return WicketError::timeout(
                        Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                        format!("POST {}", TICKETS_PATH),
                    );
                }
                WicketError::Http(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(self.handle_http_error(status, response).await);
        }

        tracing::debug!(status = %status, "ticket created");
        Ok(())
    }

    /// Converts a non-200 response into a `WicketError::HttpStatus`.
    ///
    /// The remote body is sanitized and truncated before it can be
    /// embedded in the result record.
    async fn handle_http_error(&self, status: StatusCode, response: reqwest::Response) -> WicketError {
        let body = response.text().await.unwrap_or_default();
        let body = WicketError::sanitize_message(&body, &self.api_key);
        let body = if body.len() > MAX_ERROR_BODY_LEN {
            format!("{}...[truncated]", &body[..MAX_ERROR_BODY_LEN])
        } else {
            body
        };

        WicketError::HttpStatus { status, body }
    }
}
