//! JSON:API document models shared by all resources

use serde::Deserialize;
use serde_json::{Map, Value};

/// A single resource object: `{id, type, attributes, relationships}`
///
/// Attributes are generic so callers can pick a typed view
/// (e.g. `JsonApiResource<WorkspaceAttributes>`) or keep raw JSON.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct JsonApiResource<A = Map<String, Value>> {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub attributes: Option<A>,
    #[serde(default)]
    pub relationships: Option<Map<String, Value>>,
}

impl<A> JsonApiResource<A> {
    /// Id of a to-one relationship (`relationships.<name>.data.id`)
    pub fn related_id(&self, name: &str) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.get(name))
            .and_then(|rel| rel.pointer("/data/id"))
            .and_then(Value::as_str)
    }
}
