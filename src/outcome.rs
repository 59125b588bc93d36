//! Terminal result record for one invocation.
//!
//! Every invocation ends in a [`SubmitOutcome`], printed as a single JSON
//! object on stdout. The record is the only thing the caller sees; no
//! other state is persisted.

use serde::Serialize;

use crate::error::WicketError;

/// Outcome of one ticket submission attempt.
///
/// `changed` is always `false`: ticket creation does not map onto a
/// tracked idempotent state, so the caller's state model is never told a
/// mutation happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// Whether the invocation changed tracked state. Always `false`.
    pub changed: bool,

    /// `"OK"` on success, a descriptive failure string otherwise.
    pub message: String,

    /// Whether the invocation failed.
    pub failed: bool,
}

impl SubmitOutcome {
    /// The successful outcome.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            changed: false,
            message: "OK".to_string(),
            failed: false,
        }
    }

    /// A failed outcome carrying a descriptive message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            message: message.into(),
            failed: true,
        }
    }

    /// Folds an error into a failed outcome with a sanitized message.
    ///
    /// The API key is stripped from the message before it can reach
    /// stdout or a log line.
    #[must_use]
    pub fn from_error(err: &WicketError, api_key: &str) -> Self {
        Self::failure(err.sanitized_display(api_key))
    }
}
