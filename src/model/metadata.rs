use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form metadata attached to a note by the server.
///
/// The note service stores arbitrary JSON here (source URLs, AI context
/// flags, word counts). Typed accessors cover the common lookups; anything
/// else is available through [`Metadata::get`].
///
/// # Examples
///
/// ```
/// # use synapse_tree::Metadata;
/// let metadata: Metadata = serde_json::from_str(r#"{"source": "web", "words": 120}"#).unwrap();
///
/// assert_eq!(metadata.get_str("source"), Some("web"));
/// assert_eq!(metadata.get("words").and_then(|v| v.as_u64()), Some(120));
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Metadata {
    #[serde(flatten)]
    pub(super) data: Map<String, Value>,
}

impl Metadata {
    /// Returns a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns a metadata value by key if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.data.insert(key.into(), value)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Serializes the whole object back to a JSON string.
    pub fn to_json(&self) -> String {
        Value::Object(self.data.clone()).to_string()
    }
}
