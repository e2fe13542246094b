use serde::{Deserialize, Serialize};

/// Tuning for entry readers and writers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Ceiling for a single record. Line and value buffers grow on demand
    /// up to this size.
    pub max_record_size: usize,
    /// zstd compression level used by writers.
    pub zstd_level: i32,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            max_record_size: 64 * 1024 * 1024,
            zstd_level: 3,
        }
    }
}
