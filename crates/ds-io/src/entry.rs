use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of a dataset body.
///
/// `index` is the position in the stream. `key` is set for entries of
/// object-shaped bodies and absent for array-shaped ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: Value,
}

impl Entry {
    /// An entry of an array-shaped body.
    pub fn indexed(index: usize, value: Value) -> Self {
        Self {
            index,
            key: None,
            value,
        }
    }

    /// An entry of an object-shaped body.
    pub fn keyed(index: usize, key: impl Into<String>, value: Value) -> Self {
        Self {
            index,
            key: Some(key.into()),
            value,
        }
    }
}
