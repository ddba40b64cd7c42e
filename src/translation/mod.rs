/*!
 * Translation of ITF structural identifiers.
 *
 * This module contains the translator engine and the lookup tables it uses:
 *
 * - `core`: the translator engine (translate and validate passes)
 * - `dictionary`: word dictionary for one language pair
 * - `rules`: context-scoped override rules
 * - `markers`: structural markers and the scope they open
 * - `validation`: reports produced by the validation pass
 */

// Re-export main types for easier usage
pub use self::core::{ItfTranslator, TranslatorOptions};
pub use self::dictionary::{Dictionary, LookupMode};
pub use self::markers::{Marker, MarkerLine, TranslationContext};
pub use self::rules::{RuleSet, TranslationRule};
pub use self::validation::{UnresolvedWord, ValidationPolicy, ValidationReport};

// Submodules
pub mod core;
pub mod dictionary;
pub mod markers;
pub mod rules;
pub mod validation;
