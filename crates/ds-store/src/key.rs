//! Content keys.
//!
//! Keys are opaque strings of the form `/mem/b3-<64 hex chars>`. Keys read
//! back from documents are accepted as-is; only keys minted by
//! [`ContentKey::for_bytes`] are guaranteed to carry a digest.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

const PREFIX: &str = "/mem/b3-";

/// Opaque content identifier for a stored blob.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentKey(String);

impl ContentKey {
    /// The key for `data`: the BLAKE3 hash of exactly these bytes.
    pub fn for_bytes(data: &[u8]) -> Self {
        Self(format!("{PREFIX}{}", hex::encode(blake3::hash(data).as_bytes())))
    }

    /// Wrap a key string read from elsewhere, without checking its shape.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Parse a key string, requiring the BLAKE3 form.
    pub fn parse(key: &str) -> StoreResult<Self> {
        let key = Self::new(key);
        key.digest()?;
        Ok(key)
    }

    /// The raw 32-byte digest encoded in this key.
    pub fn digest(&self) -> StoreResult<[u8; 32]> {
        let invalid = |reason: String| StoreError::InvalidKey {
            key: self.0.clone(),
            reason,
        };
        let hex_part = self
            .0
            .strip_prefix(PREFIX)
            .ok_or_else(|| invalid(format!("missing {PREFIX:?} prefix")))?;
        let bytes = hex::decode(hex_part).map_err(|e| invalid(e.to_string()))?;
        bytes
            .try_into()
            .map_err(|b: Vec<u8>| invalid(format!("digest is {} bytes, expected 32", b.len())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `data` hashes to this key.
    pub fn verify(&self, data: &[u8]) -> bool {
        *self == Self::for_bytes(data)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentKey({})", self.0)
    }
}

impl From<ContentKey> for String {
    fn from(key: ContentKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ContentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic() {
        assert_eq!(ContentKey::for_bytes(b"hello"), ContentKey::for_bytes(b"hello"));
        assert_ne!(ContentKey::for_bytes(b"hello"), ContentKey::for_bytes(b"world"));
    }

    #[test]
    fn key_shape() {
        let key = ContentKey::for_bytes(b"hello");
        assert!(key.as_str().starts_with("/mem/b3-"));
        assert_eq!(key.as_str().len(), PREFIX.len() + 64);
        assert_eq!(key.digest().unwrap(), *blake3::hash(b"hello").as_bytes());
        assert!(key.verify(b"hello"));
        assert!(!key.verify(b"hello!"));
    }

    #[test]
    fn parse_requires_digest_form() {
        let key = ContentKey::for_bytes(b"x");
        assert_eq!(ContentKey::parse(key.as_str()).unwrap(), key);
        assert!(matches!(
            ContentKey::parse("/ipfs/QmFoo"),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(ContentKey::parse("/mem/b3-zz").is_err());
        assert!(ContentKey::parse("/mem/b3-abcd").is_err());
    }

    #[test]
    fn opaque_keys_are_accepted() {
        let key = ContentKey::new("/mem/whatever");
        assert_eq!(key.to_string(), "/mem/whatever");
        assert!(key.digest().is_err());
    }

    #[test]
    fn serde_is_plain_string() {
        let key = ContentKey::for_bytes(b"x");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{key}\""));
        let back: ContentKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
