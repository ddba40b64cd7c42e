use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use isolang::Language as IsoLanguage;
use serde::{Deserialize, Serialize};

use crate::errors::TranslatorError;

/// Language utilities for the translator
///
/// The ITF dictionaries carry one column per supported language. This module
/// maps ISO 639-1 / 639-2 codes onto those columns and back.

/// Languages a dictionary row carries, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "de", alias = "deu", alias = "ger")]
    German,
    #[serde(alias = "fr", alias = "fra", alias = "fre")]
    French,
    #[serde(alias = "it", alias = "ita")]
    Italian,
}

impl Language {
    /// All supported languages, ordered by dictionary column
    pub const ALL: [Language; 3] = [Language::German, Language::French, Language::Italian];

    /// Zero-based column of this language in a dictionary row
    pub fn column(self) -> usize {
        match self {
            Self::German => 0,
            Self::French => 1,
            Self::Italian => 2,
        }
    }

    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Self::German => "de",
            Self::French => "fr",
            Self::Italian => "it",
        }
    }

    /// English display name
    pub fn name(self) -> &'static str {
        match self {
            Self::German => "German",
            Self::French => "French",
            Self::Italian => "Italian",
        }
    }

    /// Resolve an ISO 639-1 or 639-2 code to a supported language
    pub fn from_code(code: &str) -> std::result::Result<Self, TranslatorError> {
        let part2t = normalize_to_part2t(code)
            .map_err(|_| TranslatorError::UnsupportedLanguage(code.to_string()))?;

        match part2t.as_str() {
            "deu" => Ok(Self::German),
            "fra" => Ok(Self::French),
            "ita" => Ok(Self::Italian),
            _ => Err(TranslatorError::UnsupportedLanguage(code.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = TranslatorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "german" => Ok(Self::German),
            "french" => Ok(Self::French),
            "italian" => Ok(Self::Italian),
            _ => Self::from_code(&lowered),
        }
    }
}

// ISO 639-2/B codes that differ from their 639-2/T form
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        _ => None,
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = IsoLanguage::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if IsoLanguage::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(part2t) = bibliographic_to_terminology(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}
