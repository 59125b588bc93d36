//! Error types for wicket.
//!
//! This module defines `WicketError`, the unified error type used throughout
//! the crate for consistent error handling and propagation.
//!
//! # Security
//!
//! All error messages are sanitized to ensure API keys are never leaked
//! in logs or the terminal result. Use `sanitize_message()` when constructing
//! messages from external sources.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all wicket operations.
///
/// Each variant provides specific context about the failure, enabling
/// meaningful error messages without leaking sensitive information
/// like API keys. Every variant is terminal for a single invocation;
/// nothing is retried internally.
#[derive(Error, Debug)]
pub enum WicketError {
    /// Configuration error - malformed environment values or ticket URL.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required top-level ticket parameter is missing or empty.
    #[error("required parameter missing: {field}")]
    Validation {
        /// Name of the missing parameter.
        field: &'static str,
    },

    /// An attachment entry is missing a required field.
    #[error("attachment {index}: required field missing: {field}")]
    Attachment {
        /// Zero-based position of the offending attachment.
        index: usize,
        /// Name of the missing field (`name` or `data`).
        field: &'static str,
    },

    /// HTTP request failed during transmission (DNS, TLS, connection).
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The ticket API returned a non-200 status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading the parameter document failed.
    #[error("failed to read parameter document: {0}")]
    Io(#[from] std::io::Error),
}

impl WicketError {
    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        WicketError::Config(message.into())
    }

    /// Creates a validation error for a missing required parameter.
    pub fn missing_param(field: &'static str) -> Self {
        WicketError::Validation { field }
    }

    /// Creates an attachment validation error.
    pub fn attachment_field(index: usize, field: &'static str) -> Self {
        WicketError::Attachment { index, field }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        WicketError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Returns true if the error was raised before any network activity.
    ///
    /// Validation and attachment errors are always produced while building
    /// the payload, so a caller seeing one of these knows nothing was sent.
    #[must_use]
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            WicketError::Validation { .. }
                | WicketError::Attachment { .. }
                | WicketError::Config(_)
        )
    }

    /// Sanitizes a message to remove any occurrence of the API key.
    ///
    /// API keys must never appear in logs, error messages, or the
    /// terminal result record.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_key` - The API key to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the API key replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    ///
    /// Use this when folding an error into the result record or a log line.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }
}
