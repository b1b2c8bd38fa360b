use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Load-balancing strategy definition.
///
/// `name` is the identity and the key the record is stored under. `kind`
/// selects the algorithm class (e.g. "ip-hash", "round-robin",
/// "consistent_hash"); algorithm-specific parameters live in
/// `dynamic_attributes` as an open string-to-string mapping. The map is a
/// `BTreeMap` so equality and serialization are independent of insertion
/// order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(
        rename = "dynamicAttributes",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub dynamic_attributes: BTreeMap<String, String>,
}

impl Strategy {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { name: name.into(), kind: kind.into(), dynamic_attributes: BTreeMap::new() }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dynamic_attributes.insert(key.into(), value.into());
        self
    }

    pub fn set_dynamic_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.dynamic_attributes.insert(key.into(), value.into());
    }

    pub fn dynamic_attribute(&self, key: &str) -> Option<&str> {
        self.dynamic_attributes.get(key).map(String::as_str)
    }
}
