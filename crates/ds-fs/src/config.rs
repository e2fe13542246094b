use serde::{Deserialize, Serialize};

/// Options for [`save_dataset`](crate::save_dataset).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    /// Also store the abstract forms of the structure and transform.
    pub store_abstract: bool,
    /// Store body bytes and point `body_path` at them. When `false` the
    /// bytes are dropped and `body_path` is kept as given.
    pub pin_body: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            store_abstract: true,
            pin_body: true,
        }
    }
}

impl SaveOptions {
    /// Store only the concrete documents.
    pub fn concrete_only() -> Self {
        Self {
            store_abstract: false,
            ..Default::default()
        }
    }
}
