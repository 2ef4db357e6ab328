use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A schemaless record: a JSON object with arbitrary fields.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A record together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub data: Record,
}

impl Document {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Project the record onto a typed shape.
    ///
    /// Fails when a field the target type requires is missing or has the
    /// wrong type; unknown fields are ignored.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(self.data.clone()))
    }
}
