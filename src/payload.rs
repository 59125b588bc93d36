//! Wire payload assembly for ticket creation.
//!
//! This module turns a validated [`TicketParams`] into the JSON body the
//! osTicket web API expects. It performs no I/O and is deterministic for
//! identical input, so every encoding rule can be tested without touching
//! the HTTP layer.
//!
//! # Encoding rules
//!
//! - The message body is embedded as a data URI, `data:<mime>,<content>`.
//!   The MIME type is always present, falling back to `text/plain`.
//! - Each attachment becomes a single-entry object mapping a key to a data
//!   URI, `data:[<type>][;<encoding>],<data>`.
//! - `custom_fields` are merged into the top level last and overwrite any
//!   key already set.

use serde_json::{Map, Value};

use crate::error::WicketError;
use crate::params::{AttachmentParam, TicketParams};

/// Fallback MIME type for the message body.
///
/// The normalizer already defaults `message_mime`, but an explicitly empty
/// string in the document still gets this value.
const DEFAULT_MESSAGE_MIME: &str = "text/plain";

/// Extractor for one optional payload field.
type FieldExtractor = fn(&TicketParams) -> Option<Value>;

/// Ordered table of optional payload fields.
///
/// Each entry maps a payload key to an extractor that yields `Some` only
/// when the parameter value is truthy. A `false` boolean is dropped rather
/// than sent, leaving the remote default in charge; on the wire it is
/// indistinguishable from unset.
static OPTIONAL_FIELDS: &[(&str, FieldExtractor)] = &[
    ("alert", |p| p.alert.then_some(Value::Bool(true))),
    ("autorespond", |p| p.autorespond.then_some(Value::Bool(true))),
    ("ip", |p| string_value(&p.ip)),
    ("priority", |p| string_value(&p.priority)),
    ("source", |p| string_value(&p.source)),
    ("topicid", |p| string_value(&p.topicid)),
];

/// Converts a non-empty optional string into a JSON value.
fn string_value(value: &Option<String>) -> Option<Value> {
    value
        .as_ref()
        .filter(|s| !s.is_empty())
        .map(|s| Value::String(s.clone()))
}

/// Builds the JSON payload for one ticket submission.
///
/// Validates the parameter set first, so a missing required field or a bad
/// attachment entry fails here, before any network activity.
///
/// # Errors
///
/// - `WicketError::Validation` when a required parameter is missing.
/// - `WicketError::Attachment` when an attachment lacks `name` or `data`.
pub fn build_payload(params: &TicketParams) -> Result<Value, WicketError> {
    params.validate()?;

    let mut data = Map::new();

    // Required identity fields. validate() guarantees presence.
    let requester = params.name.as_deref().unwrap_or_default();
    data.insert("name".to_string(), Value::String(requester.to_string()));
    data.insert(
        "email".to_string(),
        Value::String(params.email.clone().unwrap_or_default()),
    );
    data.insert(
        "subject".to_string(),
        Value::String(params.subject.clone().unwrap_or_default()),
    );

    data.insert(
        "message".to_string(),
        Value::String(encode_message(params)),
    );

    for (key, extract) in OPTIONAL_FIELDS {
        if let Some(value) = extract(params) {
            data.insert((*key).to_string(), value);
        }
    }

    if let Some(list) = &params.attachments {
        if !list.is_empty() {
            let mut entries = Vec::with_capacity(list.len());
            for (index, attachment) in list.iter().enumerate() {
                entries.push(encode_attachment(
                    index,
                    attachment,
                    requester,
                    params.attachments_keyed_by_filename,
                )?);
            }
            data.insert("attachments".to_string(), Value::Array(entries));
        }
    }

    if let Some(custom) = &params.custom_fields {
        for (key, value) in custom {
            data.insert(key.clone(), value.clone());
        }
    }

    Ok(Value::Object(data))
}

/// Encodes the message body as a data URI.
fn encode_message(params: &TicketParams) -> String {
    let mime = if params.message_mime.is_empty() {
        DEFAULT_MESSAGE_MIME
    } else {
        &params.message_mime
    };
    format!("data:{},{}", mime, params.message.as_deref().unwrap_or_default())
}

/// Encodes one attachment as a single-entry object keyed per configuration.
///
/// # Errors
///
/// Returns `WicketError::Attachment` naming the missing field and entry
/// index when `name` or `data` is absent.
fn encode_attachment(
    index: usize,
    attachment: &AttachmentParam,
    requester: &str,
    keyed_by_filename: bool,
) -> Result<Value, WicketError> {
    let name = attachment
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| WicketError::attachment_field(index, "name"))?;

    let content = attachment
        .data
        .as_deref()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| WicketError::attachment_field(index, "data"))?;

    let mut data_uri = String::from("data:");
    if let Some(mime) = attachment.mime.as_deref() {
        data_uri.push_str(mime);
    }
    if let Some(encoding) = attachment.encoding.as_deref() {
        data_uri.push(';');
        data_uri.push_str(encoding);
    }
    data_uri.push(',');
    data_uri.push_str(content);

    let key = if keyed_by_filename { name } else { requester };

    let mut entry = Map::new();
    entry.insert(key.to_string(), Value::String(data_uri));
    Ok(Value::Object(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(doc: serde_json::Value) -> TicketParams {
        serde_json::from_value(doc).unwrap()
    }

    fn base_doc() -> serde_json::Value {
        serde_json::json!({
            "url": "https://osticket.example.com",
            "api_key": "k3y",
            "name": "Jane Doe",
            "email": "jane.doe@example.com",
            "subject": "Printer might be out of ink.",
            "message": "Hello"
        })
    }

    #[test]
    fn test_message_data_uri_with_default_mime() {
        let payload = build_payload(&params(base_doc())).unwrap();
        assert_eq!(payload["message"], "data:text/plain,Hello");
    }

    #[test]
    fn test_message_data_uri_with_explicit_mime() {
        let mut doc = base_doc();
        doc["message_mime"] = "text/html".into();
        let payload = build_payload(&params(doc)).unwrap();
        assert_eq!(payload["message"], "data:text/html,Hello");
    }

    #[test]
    fn test_message_mime_falls_back_when_empty() {
        let mut doc = base_doc();
        doc["message_mime"] = "".into();
        let payload = build_payload(&params(doc)).unwrap();
        assert_eq!(payload["message"], "data:text/plain,Hello");
    }

    #[test]
    fn test_default_booleans_sent_as_true() {
        let payload = build_payload(&params(base_doc())).unwrap();
        assert_eq!(payload["alert"], true);
        assert_eq!(payload["autorespond"], true);
    }

    #[test]
    fn test_false_booleans_dropped_from_payload() {
        let mut doc = base_doc();
        doc["alert"] = false.into();
        doc["autorespond"] = false.into();
        let payload = build_payload(&params(doc)).unwrap();
        assert!(payload.get("alert").is_none());
        assert!(payload.get("autorespond").is_none());
    }

    #[test]
    fn test_optional_strings_included_when_set() {
        let mut doc = base_doc();
        doc["ip"] = "198.51.100.7".into();
        doc["priority"] = "2".into();
        doc["source"] = "API".into();
        doc["topicid"] = "11".into();
        let payload = build_payload(&params(doc)).unwrap();
        assert_eq!(payload["ip"], "198.51.100.7");
        assert_eq!(payload["priority"], "2");
        assert_eq!(payload["source"], "API");
        assert_eq!(payload["topicid"], "11");
    }

    #[test]
    fn test_optional_strings_absent_when_unset() {
        let payload = build_payload(&params(base_doc())).unwrap();
        for key in ["ip", "priority", "source", "topicid"] {
            assert!(payload.get(key).is_none(), "{key} should be absent");
        }
    }

    #[test]
    fn test_no_attachments_key_without_attachments() {
        let payload = build_payload(&params(base_doc())).unwrap();
        assert!(payload.get("attachments").is_none());
    }

    #[test]
    fn test_empty_attachment_list_omitted() {
        let mut doc = base_doc();
        doc["attachments"] = serde_json::json!([]);
        let payload = build_payload(&params(doc)).unwrap();
        assert!(payload.get("attachments").is_none());
    }

    #[test]
    fn test_attachment_keyed_by_requester_name() {
        let mut doc = base_doc();
        doc["attachments"] = serde_json::json!([{
            "name": "Screenshot.png",
            "type": "image/png",
            "data": "QUJD",
            "encoding": "base64"
        }]);
        let payload = build_payload(&params(doc)).unwrap();
        assert_eq!(
            payload["attachments"],
            serde_json::json!([{"Jane Doe": "data:image/png;base64,QUJD"}])
        );
    }

    #[test]
    fn test_attachment_keyed_by_filename_option() {
        let mut doc = base_doc();
        doc["attachments_keyed_by_filename"] = true.into();
        doc["attachments"] = serde_json::json!([
            {"name": "a.txt", "type": "text/plain", "data": "QQ=="},
            {"name": "b.txt", "type": "text/plain", "data": "Qg=="}
        ]);
        let payload = build_payload(&params(doc)).unwrap();
        assert_eq!(
            payload["attachments"],
            serde_json::json!([
                {"a.txt": "data:text/plain,QQ=="},
                {"b.txt": "data:text/plain,Qg=="}
            ])
        );
    }

    #[test]
    fn test_attachment_without_type_or_encoding() {
        let mut doc = base_doc();
        doc["attachments"] = serde_json::json!([{"name": "raw.bin", "data": "xyz"}]);
        let payload = build_payload(&params(doc)).unwrap();
        assert_eq!(
            payload["attachments"],
            serde_json::json!([{"Jane Doe": "data:,xyz"}])
        );
    }

    #[test]
    fn test_attachment_missing_data_fails_whole_list() {
        let mut doc = base_doc();
        doc["attachments"] = serde_json::json!([
            {"name": "ok.png", "type": "image/png", "data": "QUJD"},
            {"name": "broken.png", "type": "image/png"}
        ]);
        let err = build_payload(&params(doc)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("attachment 1"));
        assert!(msg.contains("data"));
    }

    #[test]
    fn test_attachment_missing_name_fails() {
        let mut doc = base_doc();
        doc["attachments"] = serde_json::json!([{"data": "QUJD"}]);
        let err = build_payload(&params(doc)).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_custom_fields_merged_into_top_level() {
        let mut doc = base_doc();
        doc["custom_fields"] = serde_json::json!({"phone": "05 70 27 14 91"});
        let payload = build_payload(&params(doc)).unwrap();
        assert_eq!(payload["phone"], "05 70 27 14 91");
    }

    #[test]
    fn test_custom_fields_override_builtin_keys() {
        let mut doc = base_doc();
        doc["custom_fields"] = serde_json::json!({"subject": "overridden"});
        let payload = build_payload(&params(doc)).unwrap();
        assert_eq!(payload["subject"], "overridden");
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut doc = base_doc();
        doc.as_object_mut().unwrap().remove("subject");
        let err = build_payload(&params(doc)).unwrap_err();
        assert!(err.to_string().contains("subject"));
        assert!(err.is_pre_flight());
    }

    #[test]
    fn test_payload_is_deterministic() {
        let a = build_payload(&params(base_doc())).unwrap();
        let b = build_payload(&params(base_doc())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_payload_never_contains_api_key() {
        let mut doc = base_doc();
        doc["attachments"] = serde_json::json!([{"name": "a.txt", "data": "QQ=="}]);
        doc["custom_fields"] = serde_json::json!({"phone": "12 34 56 78"});
        let payload = build_payload(&params(doc)).unwrap();
        let body = serde_json::to_string(&payload).unwrap();
        assert!(!body.contains("k3y"));
    }
}
