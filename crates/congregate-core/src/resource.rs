//! JSON:API resource model.
//!
//! Upstream payloads are JSON:API shaped: a `data` array of resources plus an
//! optional `included` side table. Resources stay close to the wire —
//! `attributes` and `relationships` remain dynamic maps — while relationship
//! stubs get a typed, lenient parse that never fails on malformed values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single JSON:API resource. Identity is `(type, id)`.
///
/// Unknown top-level members (`links`, meta objects, …) are captured in
/// `extra` and serialized back verbatim. Resolved relationships and
/// enrichment fields (`groupDetails`, `groupImage`, `enrollmentStrategy`)
/// are written into `extra` as well, so the outward shape is the upstream
/// resource plus sibling fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub relationships: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource {
    /// Parse the named relationship's stub(s), if present and well formed.
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<RelationshipRef> {
        RelationshipRef::from_value(self.relationships.get(name)?)
    }
}

/// A `{type, id}` relationship stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            kind: object.get("type")?.as_str()?.to_string(),
            id: object.get("id")?.as_str()?.to_string(),
        })
    }
}

/// The `data` member of a relationship: a single stub or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipRef {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

impl RelationshipRef {
    /// Parse a relationship value's `data` member.
    ///
    /// Absent or malformed data yields `None` rather than an error; entries
    /// of a sequence that are not valid stubs are dropped.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_object()?.get("data")? {
            Value::Array(items) => Some(RelationshipRef::Many(
                items.iter().filter_map(ResourceIdentifier::from_value).collect(),
            )),
            data @ Value::Object(_) => ResourceIdentifier::from_value(data).map(RelationshipRef::One),
            _ => None,
        }
    }
}

/// Top-level JSON:API document as returned by the upstream list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub data: Vec<Resource>,
    #[serde(default)]
    pub included: Vec<Resource>,
    #[serde(default)]
    pub links: Map<String, Value>,
}

impl Document {
    /// Whether the upstream reported a further page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.links.get("next").is_some_and(|next| !next.is_null())
    }
}
