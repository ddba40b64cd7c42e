/*!
 * Result of a validation pass.
 *
 * Validation never stops at the first unresolved word: every distinct
 * identifier that cannot be translated is reported, so the dictionary can be
 * fixed in one go.
 */

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::markers::Marker;

/// What a validation pass consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Only the dictionary
    #[default]
    DictionaryOnly,
    /// Override rules first, then the dictionary, as `translate` does
    RulesThenDictionary,
}

/// An identifier the dictionary cannot translate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedWord {
    #[serde(serialize_with = "serialize_marker")]
    pub marker: Marker,
    pub identifier: String,
    /// 1-based line of the first occurrence
    pub line: usize,
}

fn serialize_marker<S: serde::Serializer>(marker: &Marker, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(marker.keyword())
}

impl fmt::Display for UnresolvedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} {}", self.line, self.marker, self.identifier)
    }
}

/// Unresolved identifiers found in one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    unresolved: Vec<UnresolvedWord>,
    /// Number of marker lines checked
    pub markers_checked: usize,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a miss. Returns false when the identifier was already reported.
    ///
    /// Deduplication keys on the identifier alone: a word missing as both a
    /// topic and a table is reported once, under the marker it first appeared
    /// with.
    pub fn record(&mut self, marker: Marker, identifier: &str, line: usize) -> bool {
        if !self.seen.insert(identifier.to_string()) {
            return false;
        }
        self.unresolved.push(UnresolvedWord {
            marker,
            identifier: identifier.to_string(),
            line,
        });
        true
    }

    /// True when every marker identifier resolved
    pub fn is_translatable(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn unresolved(&self) -> &[UnresolvedWord] {
        &self.unresolved
    }

    pub fn into_unresolved(self) -> Vec<UnresolvedWord> {
        self.unresolved
    }
}
