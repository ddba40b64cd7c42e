/*!
 * Context-scoped override rules.
 *
 * Some translations are not reversible. In the DM01AVCH model the French
 * `Element_lineaire` is either German `Linienelement` or `Linienobjekt`
 * depending on the topic. A rule pins the translation of the table that is
 * current inside a given topic.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::language_utils::Language;

/// Translation to use for one (language pair, topic, table) combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRule {
    pub from: Language,
    pub to: Language,
    /// Topic name in the source language
    pub topic: String,
    /// Table name in the source language
    pub table: String,
    /// Replacement written for the identifier
    pub translation: String,
}

impl TranslationRule {
    pub fn new(
        from: Language,
        to: Language,
        topic: impl Into<String>,
        table: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            topic: topic.into(),
            table: table.into(),
            translation: translation.into(),
        }
    }

    /// Whether all four key fields match exactly
    pub fn matches(&self, from: Language, to: Language, topic: &str, table: &str) -> bool {
        self.from == from && self.to == to && self.topic == topic && self.table == table
    }
}

/// Ordered collection of override rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<TranslationRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: TranslationRule) {
        self.rules.push(rule);
    }

    /// Append every rule of `other` after the rules already held
    pub fn extend<I: IntoIterator<Item = TranslationRule>>(&mut self, other: I) {
        self.rules.extend(other);
    }

    /// Replacement of the first rule matching the current context.
    ///
    /// Nothing matches while the topic or the table is unset.
    pub fn resolve(&self, from: Language, to: Language, topic: Option<&str>, table: Option<&str>) -> Option<&str> {
        let (topic, table) = (topic?, table?);

        let rule = self.rules.iter().find(|rule| rule.matches(from, to, topic, table))?;
        debug!("Rule hit for {}/{} ({} -> {}): {}", topic, table, from, to, rule.translation);
        Some(rule.translation.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<TranslationRule>> for RuleSet {
    fn from(rules: Vec<TranslationRule>) -> Self {
        Self { rules }
    }
}

impl FromIterator<TranslationRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = TranslationRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RuleSet {
    type Item = TranslationRule;
    type IntoIter = std::vec::IntoIter<TranslationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}
