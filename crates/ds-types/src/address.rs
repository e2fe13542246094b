//! Hierarchical namespace addresses.
//!
//! An address divides the global namespace into ordered segments. The
//! external representation is a single dot-joined string:
//!
//! ```
//! use ds_types::Address;
//!
//! let a = Address::new(["user.dataset", "table"]);
//! assert_eq!(a, Address::new(["user", "dataset", "table"]));
//! assert_eq!(a.to_string(), "user.dataset.table");
//! assert_eq!(a.path_string(&["body"]), "/user/dataset/table/body");
//! ```
//!
//! Valid segments are non-empty and contain only `a-z`, `0-9`, `_`, `-`
//! and `/`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Extra characters allowed in a segment besides lowercase ASCII and digits.
const SEGMENT_PUNCTUATION: &[char] = &['_', '-', '/'];

/// Ordered, immutable sequence of namespace segments.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    segments: Vec<String>,
}

impl Address {
    /// Build an address from one or more dot-delimited strings.
    ///
    /// Every part is split on `.` and the pieces are flattened in order.
    /// Empty pieces are discarded. No validation is performed; use
    /// [`Address::try_new`] or [`Address::parse`] for untrusted input.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = parts
            .into_iter()
            .flat_map(|part| {
                part.as_ref()
                    .split('.')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { segments }
    }

    /// The empty address. It is an ancestor of every non-empty address.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build and validate an address from one or more dot-delimited strings.
    pub fn try_new<I, S>(parts: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let address = Self::new(parts);
        address.validate()?;
        Ok(address)
    }

    /// Parse a single dot-joined address string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Self::try_new([s])
    }

    /// Check every segment against the segment pattern.
    pub fn validate(&self) -> Result<(), TypeError> {
        for segment in &self.segments {
            validate_segment(segment).map_err(|reason| TypeError::InvalidAddress {
                address: self.to_string(),
                reason,
            })?;
        }
        Ok(())
    }

    /// The segments of this address, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if no segment is assigned.
    pub fn is_empty(&self) -> bool {
        self.segments.first().map_or(true, |s| s.is_empty())
    }

    /// A new address with `segment` appended (split on `.` like [`Address::new`]).
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(
            segment
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        Self { segments }
    }

    /// Slash-joined path form with optional trailing path components.
    pub fn path_string(&self, path: &[&str]) -> String {
        format!("/{}/{}", self.segments.join("/"), path.join("/"))
    }

    /// The address with its last segment dropped.
    ///
    /// Addresses of length one or zero have the empty address as parent.
    pub fn parent(&self) -> Self {
        if self.segments.len() <= 1 {
            return Self::empty();
        }
        Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    /// Returns `true` if `other` is a direct child of this address.
    pub fn is_parent(&self, other: &Address) -> bool {
        self.segments.len() + 1 == other.segments.len() && self.is_prefix_of(other)
    }

    /// Returns `true` if this address is a strict prefix of `other`.
    pub fn is_ancestor(&self, other: &Address) -> bool {
        if self.segments.len() >= other.segments.len() {
            return false;
        }
        self.is_empty() || self.is_prefix_of(other)
    }

    fn is_prefix_of(&self, other: &Address) -> bool {
        self.segments
            .iter()
            .zip(other.segments.iter())
            .all(|(a, b)| a == b)
    }
}

/// Returns `true` if `s` is a valid dot-joined address string.
pub fn is_valid_address_string(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('.')
        && !s.ends_with('.')
        && s.split('.').all(|segment| validate_segment(segment).is_ok())
}

fn validate_segment(segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err("segments must not be empty".into());
    }
    if let Some(ch) = segment.chars().find(|ch| !is_segment_char(*ch)) {
        return Err(format!("segment {segment:?} contains forbidden character {ch:?}"));
    }
    Ok(())
}

fn is_segment_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || SEGMENT_PUNCTUATION.contains(&ch)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}
