/*!
 * Error types for the itf-translator application.
 *
 * This module contains custom error types for the different parts of the
 * translator, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::translation::UnresolvedWord;

/// Errors that can occur while loading a dictionary or translating a file
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// A structural identifier has no dictionary entry and no override rule
    #[error("Key not found in dictionary: {word}")]
    LookupMiss {
        /// The untranslated identifier
        word: String,
    },

    /// A dictionary row does not carry enough language columns
    #[error("Malformed dictionary row at line {line}: found {fields} field(s), expected at least {required}")]
    MalformedDictionaryRow {
        /// 1-based line number in the dictionary resource
        line: usize,
        /// Number of fields found on the row
        fields: usize,
        /// Number of fields needed to reach both language columns
        required: usize,
    },

    /// Text could not be decoded or encoded with the configured encoding
    #[error("Encoding error ({encoding}): {message}")]
    Encoding {
        /// Name of the encoding in use
        encoding: &'static str,
        /// Description of the offending input
        message: String,
    },

    /// An I/O operation on a file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Source and output refer to the same file
    #[error("Output file must differ from the source file: {path:?}")]
    SameFile {
        /// The shared path
        path: PathBuf,
    },

    /// Validation found identifiers that cannot be translated
    #[error("File is not translatable, {} unresolved word(s)", unresolved.len())]
    Untranslatable {
        /// Every distinct unresolved identifier
        unresolved: Vec<UnresolvedWord>,
    },

    /// A language code does not name a supported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A model preset name is not known
    #[error("Unknown model preset: {0}")]
    UnknownPreset(String),
}

impl TranslatorError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a dictionary lookup miss
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::LookupMiss { .. })
    }
}

/// Result alias for translator operations
pub type TranslatorResult<T> = std::result::Result<T, TranslatorError>;

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the translator
    #[error("Translation error: {0}")]
    Translation(#[from] TranslatorError),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<TranslatorError>() {
            Ok(translator_error) => Self::Translation(translator_error),
            Err(error) => Self::Unknown(error.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
