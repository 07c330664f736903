//! Record types returned by the IT Glue API
//!
//! The API speaks JSON:API. Records are passed through without schema
//! validation: each one is an id, a type tag, and an opaque attribute map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A single JSON:API resource record (organization, configuration,
/// flexible asset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Record ID (the API returns these as strings)
    pub id: String,

    /// Resource type tag, e.g. `organizations` or `flexible-assets`
    #[serde(rename = "type")]
    pub kind: String,

    /// Attributes as returned by the API, unmodified
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Resource {
    /// Look up an attribute by its API name.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Look up a string attribute by its API name.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(Value::as_str)
    }

    /// Record name, present on all resource types we list.
    pub fn name(&self) -> Option<&str> {
        self.attr_str("name")
    }

    /// Hostname attribute (device configurations).
    pub fn hostname(&self) -> Option<&str> {
        self.attr_str("hostname")
    }

    /// Owning organization ID, where the resource type carries one.
    pub fn organization_id(&self) -> Option<u64> {
        self.attr("organization-id").and_then(Value::as_u64)
    }
}

/// Build the request body for creating a flexible asset.
///
/// `traits` is the caller-supplied attribute object for the asset type;
/// it is embedded verbatim.
pub fn flexible_asset_create_body(org_id: u64, type_id: u64, traits: &Value) -> Value {
    json!({
        "data": {
            "type": "flexible-assets",
            "attributes": {
                "organization-id": org_id,
                "flexible-asset-type-id": type_id,
                "traits": traits,
            }
        }
    })
}

/// Build the request body for updating a flexible asset's traits.
pub fn flexible_asset_update_body(traits: &Value) -> Value {
    json!({
        "data": {
            "type": "flexible-assets",
            "attributes": {
                "traits": traits,
            }
        }
    })
}
