//! JSON output formatting
//!
//! Records are wrapped in an envelope mirroring the upstream JSON:API shape:
//! a `data` payload plus a `meta` object with kebab-case keys.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Envelope wrapping formatted records.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: ?Sized> {
    /// The records themselves
    pub data: &'a T,

    /// Client-side response metadata
    pub meta: EnvelopeMeta,
}

/// Metadata attached to every JSON response.
#[derive(Debug, Serialize)]
pub struct EnvelopeMeta {
    /// When this output was produced
    #[serde(rename = "generated-at")]
    pub generated_at: DateTime<Utc>,

    /// Version of the CLI that produced it
    #[serde(rename = "client-version")]
    pub client_version: &'static str,
}

impl EnvelopeMeta {
    fn now() -> Self {
        Self {
            generated_at: Utc::now(),
            client_version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Format records as pretty-printed JSON inside the metadata envelope.
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope {
        data,
        meta: EnvelopeMeta::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_contains_data_and_meta() {
        let records = vec![json!({ "id": "1", "type": "organizations" })];
        let out = format_json(&records).unwrap();

        assert!(out.contains("\"data\""));
        assert!(out.contains("\"meta\""));
        assert!(out.contains("\"organizations\""));
        assert!(out.contains("\"generated-at\""));
        assert!(out.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_empty_data_still_serializes() {
        let records: Vec<serde_json::Value> = vec![];
        let out = format_json(&records).unwrap();
        assert!(out.contains("\"data\": []"));
    }

    #[test]
    fn test_meta_keys_are_kebab_case() {
        let out = format_json(&json!([])).unwrap();
        assert!(out.contains("\"client-version\""));
        assert!(!out.contains("\"client_version\""));
    }
}
