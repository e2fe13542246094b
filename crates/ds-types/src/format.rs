use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Physical encoding of a dataset body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataFormat {
    /// No format declared.
    #[default]
    Unknown,
    Csv,
    Json,
    /// Newline-delimited JSON: one value per line.
    Ndjson,
    Cbor,
    Xlsx,
}

impl DataFormat {
    /// Formats with a recognized name, in preference order.
    pub const SUPPORTED: [DataFormat; 5] = [
        DataFormat::Cbor,
        DataFormat::Json,
        DataFormat::Csv,
        DataFormat::Ndjson,
        DataFormat::Xlsx,
    ];

    /// The canonical name (also the conventional file extension).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Cbor => "cbor",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::Unknown
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Unknown),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "cbor" => Ok(Self::Cbor),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(TypeError::InvalidDataFormat(other.to_string())),
        }
    }
}

impl TryFrom<String> for DataFormat {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DataFormat> for String {
    fn from(format: DataFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Byte-level compression applied beneath a body format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Compression {
    #[default]
    None,
    /// Zstandard frames.
    Zstd,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Zstd => "zst",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::None
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compression {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::None),
            "zst" | "zstd" => Ok(Self::Zstd),
            other => Err(TypeError::InvalidCompression(other.to_string())),
        }
    }
}

impl TryFrom<String> for Compression {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Compression> for String {
    fn from(compression: Compression) -> Self {
        compression.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        for format in DataFormat::SUPPORTED {
            assert_eq!(format.as_str().parse::<DataFormat>().unwrap(), format);
        }
        assert_eq!("".parse::<DataFormat>().unwrap(), DataFormat::Unknown);
        assert_eq!("jsonl".parse::<DataFormat>().unwrap(), DataFormat::Ndjson);
    }

    #[test]
    fn invalid_format_message() {
        let err = "foo".parse::<DataFormat>().unwrap_err();
        assert_eq!(err.to_string(), "invalid data format: `foo`");
    }

    #[test]
    fn format_serde() {
        assert_eq!(serde_json::to_string(&DataFormat::Csv).unwrap(), "\"csv\"");
        let err = serde_json::from_str::<DataFormat>("\"foo\"").unwrap_err();
        assert!(err.to_string().contains("invalid data format: `foo`"));
    }

    #[test]
    fn compression_names() {
        assert_eq!("zst".parse::<Compression>().unwrap(), Compression::Zstd);
        assert_eq!("".parse::<Compression>().unwrap(), Compression::None);
        assert!("invalid".parse::<Compression>().is_err());
        assert_eq!(Compression::Zstd.to_string(), "zst");
    }
}
