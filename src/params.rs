//! Ticket parameter document.
//!
//! This module defines the flat key/value parameter set accepted on each
//! invocation, with serde defaults matching the documented behavior.
//!
//! # Input Sanitization
//!
//! `TicketParams::sanitize()` trims whitespace from string fields and
//! should be called before validation. Required-field checks live in
//! `validate()` so a missing field fails with its own name before any
//! network activity.

use serde::Deserialize;

use crate::config::Config;
use crate::error::WicketError;

fn default_true() -> bool {
    true
}

fn default_message_mime() -> String {
    "text/plain".to_string()
}

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// One attachment to add to the ticket.
///
/// `name` and `data` are required and checked while the payload is built;
/// `type` and `encoding` are optional and only affect the generated data URI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachmentParam {
    /// File name of the attachment (e.g., "Screenshot.png").
    #[serde(default)]
    pub name: Option<String>,

    /// File content, usually base64-encoded.
    #[serde(default)]
    pub data: Option<String>,

    /// MIME type of the content (e.g., "image/png").
    #[serde(default, rename = "type")]
    pub mime: Option<String>,

    /// Content transfer encoding (e.g., "base64").
    #[serde(default)]
    pub encoding: Option<String>,
}

impl AttachmentParam {
    /// Sanitizes the entry by trimming descriptive fields.
    ///
    /// `data` is deliberately left untouched; it carries the file content.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: trim_option(&self.name),
            data: self.data.filter(|d| !d.is_empty()),
            mime: trim_option(&self.mime),
            encoding: trim_option(&self.encoding),
        }
    }
}

/// The full parameter set for one ticket submission.
///
/// Deserialized from a JSON document. `url` and `api_key` may be omitted
/// when supplied through the environment (see [`Config`]); every other
/// required field must be present in the document itself.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketParams {
    /// Base URL of the osTicket instance.
    #[serde(default)]
    pub url: Option<String>,

    /// osTicket API key. Never logged, never echoed into messages.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Full name of the ticket requester.
    #[serde(default)]
    pub name: Option<String>,

    /// Email address of the ticket requester.
    #[serde(default)]
    pub email: Option<String>,

    /// Ticket subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// Free-form message body.
    #[serde(default)]
    pub message: Option<String>,

    /// MIME type of the message body.
    #[serde(default = "default_message_mime")]
    pub message_mime: String,

    /// Send an alert to staff.
    #[serde(default = "default_true")]
    pub alert: bool,

    /// Enable autoresponses for this ticket.
    #[serde(default = "default_true")]
    pub autorespond: bool,

    /// IP address of the submitter.
    #[serde(default)]
    pub ip: Option<String>,

    /// Priority ID associated with the ticket.
    #[serde(default)]
    pub priority: Option<String>,

    /// Source of the ticket.
    #[serde(default)]
    pub source: Option<String>,

    /// Help topic ID associated with the ticket.
    #[serde(default)]
    pub topicid: Option<String>,

    /// Attachments to add to the ticket. Absent means no `attachments`
    /// key in the payload at all, not an empty list.
    #[serde(default)]
    pub attachments: Option<Vec<AttachmentParam>>,

    /// Extra key/value pairs merged verbatim into the payload top level,
    /// matching additional fields on the ticket creation form. Colliding
    /// keys overwrite the built-in ones with no warning.
    #[serde(default)]
    pub custom_fields: Option<serde_json::Map<String, serde_json::Value>>,

    /// Validate certificates on TLS endpoints.
    #[serde(default = "default_true")]
    pub validate_certs: bool,

    /// Key each serialized attachment by its own file name instead of the
    /// requester's name.
    ///
    /// Defaults to false, which keys every entry by the requester's name
    /// for compatibility with existing integrations. That keying collapses
    /// multiple attachments onto a single key, so set this to true unless
    /// you depend on the old shape.
    #[serde(default)]
    pub attachments_keyed_by_filename: bool,
}

impl TicketParams {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            url: trim_option(&self.url),
            api_key: trim_option(&self.api_key),
            name: trim_option(&self.name),
            email: trim_option(&self.email),
            subject: trim_option(&self.subject),
            message: self.message.filter(|m| !m.is_empty()),
            message_mime: self.message_mime.trim().to_string(),
            alert: self.alert,
            autorespond: self.autorespond,
            ip: trim_option(&self.ip),
            priority: trim_option(&self.priority),
            source: trim_option(&self.source),
            topicid: trim_option(&self.topicid),
            attachments: self
                .attachments
                .map(|list| list.into_iter().map(AttachmentParam::sanitize).collect()),
            custom_fields: self.custom_fields,
            validate_certs: self.validate_certs,
            attachments_keyed_by_filename: self.attachments_keyed_by_filename,
        }
    }

    /// Fills `url` and `api_key` from the environment fallback.
    ///
    /// Document values always take precedence; the environment only
    /// supplies what the document left out.
    #[must_use]
    pub fn resolve(mut self, config: &Config) -> Self {
        if self.url.is_none() {
            self.url = config.url.clone();
        }
        if self.api_key.is_none() {
            self.api_key = config.api_key.clone();
        }
        self
    }

    /// Checks that every required parameter is present.
    ///
    /// # Errors
    ///
    /// Returns `WicketError::Validation` naming the first missing field.
    /// No network activity has happened when this fails.
    pub fn validate(&self) -> Result<(), WicketError> {
        let required: [(&'static str, &Option<String>); 6] = [
            ("url", &self.url),
            ("api_key", &self.api_key),
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];

        for (field, value) in required {
            if value.is_none() {
                return Err(WicketError::missing_param(field));
            }
        }

        Ok(())
    }

    /// Returns the API key, or an empty string before resolution.
    ///
    /// Intended for message sanitization at the invocation boundary.
    #[must_use]
    pub fn api_key_for_sanitization(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}
