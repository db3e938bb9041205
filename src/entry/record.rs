//! Audit entry record.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AuditResult;

use super::compress;

/// Message payload of an audit entry: free text or a structured mapping.
///
/// Serializes untagged, so a text payload becomes a JSON string and a
/// structured payload becomes the mapping itself.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Free-form message text.
    Text(String),
    /// Structured message data.
    Structured(Value),
}

impl Payload {
    /// Render the raw message for the journal mirror: text as-is,
    /// structured payloads as compact JSON.
    pub fn render_raw(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Structured(value) => value.to_string(),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Payload::Text(text),
            other => Payload::Structured(other),
        }
    }
}

/// A single audit log entry.
///
/// Field declaration order fixes the JSON key order:
/// timestamp, system, message, metadata, compressed.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// UTC timestamp, ISO 8601 with millisecond precision and trailing `Z`.
    pub timestamp: String,
    /// Upper-cased system tag.
    pub system: String,
    /// Message payload; hex-encoded zlib bytes when `compressed` is true.
    pub message: Payload,
    /// Arbitrary key-value metadata, `{}` when none was given.
    pub metadata: Value,
    /// Whether `message` holds a compressed payload.
    pub compressed: bool,
}

impl LogEntry {
    /// Build a new entry stamped with the current time.
    ///
    /// Compression applies only to text payloads; the `compressed` flag is
    /// recorded as false for structured messages regardless of the request.
    pub fn build(
        system_tag: &str,
        message: Payload,
        metadata: Option<Value>,
        compress: bool,
    ) -> AuditResult<Self> {
        let (message, compressed) = match (message, compress) {
            (Payload::Text(text), true) => (Payload::Text(compress::deflate_text(&text)?), true),
            (payload, _) => (payload, false),
        };

        Ok(Self {
            timestamp: utc_timestamp(),
            system: system_tag.to_string(),
            message,
            metadata: metadata.unwrap_or_else(|| Value::Object(Map::new())),
            compressed,
        })
    }

    /// Render the entry as a JSON string, pretty-printed when requested.
    pub fn render(&self, pretty: bool) -> AuditResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Current UTC time as ISO 8601 with millisecond precision, e.g.
/// `2024-01-15T10:30:45.123Z`.
fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
