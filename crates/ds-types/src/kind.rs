use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identity/version tag carried by every dataset document.
///
/// Each document kind has exactly one expected tag. A document decoded with
/// the tag of another kind is a schema mismatch, not a different document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Kind {
    Dataset,
    Structure,
    Meta,
    Commit,
    Transform,
    Viz,
    Stats,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 7] = [
        Kind::Dataset,
        Kind::Structure,
        Kind::Meta,
        Kind::Commit,
        Kind::Transform,
        Kind::Viz,
        Kind::Stats,
    ];

    /// The wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dataset => "ds:0",
            Self::Structure => "st:0",
            Self::Meta => "md:0",
            Self::Commit => "cm:0",
            Self::Transform => "tf:0",
            Self::Viz => "vz:0",
            Self::Stats => "sa:0",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TypeError::UnknownKind(s.to_string()))
    }
}

impl TryFrom<String> for Kind {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_tag() {
        assert_eq!("foo".parse::<Kind>(), Err(TypeError::UnknownKind("foo".into())));
    }

    #[test]
    fn serde_uses_tag() {
        assert_eq!(serde_json::to_string(&Kind::Commit).unwrap(), "\"cm:0\"");
        let k: Kind = serde_json::from_str("\"st:0\"").unwrap();
        assert_eq!(k, Kind::Structure);
        assert!(serde_json::from_str::<Kind>("\"xx:9\"").is_err());
    }
}
