/*!
 * Word dictionary for a fixed language pair.
 *
 * A dictionary resource is a delimited text file, one concept per line:
 *
 * ```text
 * # german;french;italian
 * Linienobjekt;Element_lineaire;Elemento_lineare
 * ```
 *
 * - blank lines are allowed
 * - lines starting with '#' are ignored
 * - fields contain no spaces, underscores stand in for them
 *
 * Rows are read top to bottom. When a source word is repeated, the last row wins.
 * A leading UTF-8 byte order mark is ignored.
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::encoding::TextEncoding;
use crate::errors::{TranslatorError, TranslatorResult};
use crate::language_utils::Language;

/// Field delimiter of dictionary rows
pub const FIELD_DELIMITER: char = ';';

/// Marker of a comment row
pub const COMMENT_PREFIX: char = '#';

/// What a lookup does when the word is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// A missing word is a lookup-miss error
    #[default]
    Strict,
    /// A missing word is returned unchanged
    Permissive,
}

/// Translation table from one language to another
#[derive(Debug, Clone)]
pub struct Dictionary {
    source: Language,
    target: Language,
    mode: LookupMode,
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Load a UTF-8 dictionary file for the given language pair
    pub fn from_file<P: AsRef<Path>>(path: P, source: Language, target: Language) -> TranslatorResult<Self> {
        Self::from_file_with_encoding(path, source, target, TextEncoding::Utf8)
    }

    /// Load a dictionary file stored in the given encoding
    pub fn from_file_with_encoding<P: AsRef<Path>>(
        path: P,
        source: Language,
        target: Language,
        encoding: TextEncoding,
    ) -> TranslatorResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| TranslatorError::io(path, e))?;
        let content = encoding.decode(&bytes)?;
        let dictionary = Self::parse(&content, source, target)?;

        debug!(
            "Loaded {} dictionary entries ({} -> {}) from {:?}",
            dictionary.len(),
            source,
            target,
            path
        );

        Ok(dictionary)
    }

    /// Build a dictionary from in-memory dictionary text
    pub fn parse(content: &str, source: Language, target: Language) -> TranslatorResult<Self> {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        let required = source.column().max(target.column()) + 1;
        let mut entries = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let words: Vec<&str> = line.trim_end().split(FIELD_DELIMITER).collect();
            if words.len() < required {
                return Err(TranslatorError::MalformedDictionaryRow {
                    line: index + 1,
                    fields: words.len(),
                    required,
                });
            }

            // Later rows overwrite earlier ones
            entries.insert(words[source.column()].to_string(), words[target.column()].to_string());
        }

        Ok(Self {
            source,
            target,
            mode: LookupMode::Strict,
            entries,
        })
    }

    /// Switch the behaviour of [`Dictionary::lookup`] on a miss
    pub fn with_mode(mut self, mode: LookupMode) -> Self {
        self.mode = mode;
        self
    }

    /// Translate a word, failing when it is not in the dictionary
    pub fn translate(&self, word: &str) -> TranslatorResult<&str> {
        self.get(word).ok_or_else(|| TranslatorError::LookupMiss {
            word: word.to_string(),
        })
    }

    /// Translate a word according to the dictionary's lookup mode
    pub fn lookup<'a>(&'a self, word: &'a str) -> TranslatorResult<&'a str> {
        match self.mode {
            LookupMode::Strict => self.translate(word),
            LookupMode::Permissive => Ok(self.get(word).unwrap_or(word)),
        }
    }

    /// Translation of a word, if present
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn source(&self) -> Language {
        self.source
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    /// Number of distinct source words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
