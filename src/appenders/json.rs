//! JSON payloads for the remote log endpoint
//!
//! ```json
//! {"time":"2024-03-09 07:05:01","level":"INFO","msg":"foo","source":"main.rs:42",
//!  "values":{"url":"/api"}}
//! ```
//!
//! Attribute values are always sent as strings. Without a group, attributes
//! sit next to the reserved keys and may overwrite them.

use crate::core::{LogEntry, Result};
use serde_json::{Map, Value};

/// Build the JSON object for an entry whose attributes are already merged
pub fn build_payload(entry: &LogEntry, group: Option<&str>) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(
        "time".to_string(),
        Value::String(entry.formatted_timestamp()),
    );
    payload.insert(
        "level".to_string(),
        Value::String(entry.level.to_str().to_string()),
    );
    payload.insert("msg".to_string(), Value::String(entry.message.clone()));

    if let Some(source) = entry.source {
        payload.insert("source".to_string(), Value::String(source.to_string()));
    }

    match group.filter(|name| !name.is_empty()) {
        Some(name) => {
            if !entry.attrs.is_empty() {
                let nested: Map<String, Value> = entry
                    .attrs
                    .iter()
                    .map(|attr| (attr.key.clone(), Value::String(attr.value.to_string())))
                    .collect();
                payload.insert(name.to_string(), Value::Object(nested));
            }
        }
        None => {
            for attr in &entry.attrs {
                payload.insert(attr.key.clone(), Value::String(attr.value.to_string()));
            }
        }
    }

    payload
}

/// Serialize the payload for an entry
pub fn encode(entry: &LogEntry, group: Option<&str>) -> Result<Vec<u8>> {
    let payload = build_payload(entry, group);
    Ok(serde_json::to_vec(&payload)?)
}
