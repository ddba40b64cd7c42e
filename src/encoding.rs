/*!
 * Text encodings used when reading and writing ITF files.
 *
 * INTERLIS 1 transfer files are historically ISO-8859-1. Translated files
 * have always been written as UTF-8, so the default policy is asymmetric.
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{TranslatorError, TranslatorResult};

/// A named text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1, one byte per character
    #[serde(alias = "iso-8859-1", alias = "latin-1")]
    Latin1,
    /// UTF-8
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
}

impl TextEncoding {
    /// Canonical label
    pub fn label(self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Utf8 => "UTF-8",
        }
    }

    /// Decode raw bytes into text
    pub fn decode(self, bytes: &[u8]) -> TranslatorResult<String> {
        match self {
            // Every byte is the code point of the same value
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| TranslatorError::Encoding {
                encoding: self.label(),
                message: format!("invalid byte sequence at offset {}", e.utf8_error().valid_up_to()),
            }),
        }
    }

    /// Encode text into raw bytes
    pub fn encode(self, text: &str) -> TranslatorResult<Vec<u8>> {
        match self {
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| TranslatorError::Encoding {
                        encoding: self.label(),
                        message: format!("character {:?} (U+{:04X}) is not representable", c, u32::from(c)),
                    })
                })
                .collect(),
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(Self::Latin1),
            "utf8" | "utf-8" => Ok(Self::Utf8),
            _ => Err(TranslatorError::Encoding {
                encoding: "unknown",
                message: format!("unsupported encoding name: {}", s),
            }),
        }
    }
}

/// Encodings used for the source file and the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingPolicy {
    /// Encoding of the source ITF file
    #[serde(default = "default_read_encoding")]
    pub read: TextEncoding,

    /// Encoding of the translated output file
    #[serde(default)]
    pub write: TextEncoding,
}

impl EncodingPolicy {
    /// ISO-8859-1 in, UTF-8 out
    pub fn legacy() -> Self {
        Self {
            read: TextEncoding::Latin1,
            write: TextEncoding::Utf8,
        }
    }

    /// ISO-8859-1 in and out, keeping the output a valid INTERLIS 1 file
    pub fn preserving() -> Self {
        Self {
            read: TextEncoding::Latin1,
            write: TextEncoding::Latin1,
        }
    }

    /// Same encoding both ways
    pub fn uniform(encoding: TextEncoding) -> Self {
        Self {
            read: encoding,
            write: encoding,
        }
    }
}

impl Default for EncodingPolicy {
    fn default() -> Self {
        Self::legacy()
    }
}

fn default_read_encoding() -> TextEncoding {
    TextEncoding::Latin1
}
