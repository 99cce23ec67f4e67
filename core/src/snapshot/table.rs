use crate::prelude::{Category, DecodeError};
use serde_json::Value;

/// Most recent item labels for one category, in backend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotTable {
    pub category: Category,
    pub items: Vec<String>,
}

impl SnapshotTable {
    pub fn new(category: Category, items: Vec<String>) -> Self {
        Self { category, items }
    }

    /// Object keys become items in their response order. Arrays contribute
    /// their non-null element values rather than their indices.
    pub fn from_value(category: Category, value: &Value) -> Result<Self, DecodeError> {
        let items = match value {
            Value::Object(map) => map.keys().cloned().collect(),
            Value::Array(entries) => entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::Null => None,
                    Value::String(text) => Some(text.clone()),
                    other => Some(other.to_string()),
                })
                .collect(),
            _ => return Err(DecodeError::NotACollection),
        };
        Ok(Self::new(category, items))
    }

    pub fn from_slice(category: Category, body: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(category, &value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
