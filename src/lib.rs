/*!
 * # itf-translator - Language translator for INTERLIS 1 transfer files
 *
 * A Rust library for translating the structural identifiers of INTERLIS 1
 * transfer (ITF) files between the Swiss national languages.
 *
 * ## Features
 *
 * - Translate model, topic and table names (`MODL`, `TOPI`, `TABL`)
 * - Word dictionaries with one column per language (German, French, Italian)
 * - Context-scoped override rules for names that depend on the topic
 * - Validation pass listing every unresolved word before translating
 * - Explicit ISO-8859-1 / UTF-8 encoding policy
 * - Rule presets for the DM01AVCH and MD01MOVD models
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The translator engine:
 *   - `translation::core`: Translate and validate passes
 *   - `translation::dictionary`: Word dictionary for a language pair
 *   - `translation::rules`: Context-scoped override rules
 *   - `translation::markers`: Structural markers and scope tracking
 *   - `translation::validation`: Validation reports
 * - `encoding`: Text encodings of ITF files
 * - `presets`: Override rules of the cadastral survey models
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Supported languages and ISO language codes
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod encoding;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod presets;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FolderSummary, RunOutcome};
pub use encoding::{EncodingPolicy, TextEncoding};
pub use errors::{AppError, TranslatorError, TranslatorResult};
pub use language_utils::{normalize_to_part2t, Language};
pub use presets::ModelPreset;
pub use translation::{
    Dictionary, ItfTranslator, LookupMode, Marker, RuleSet, TranslationRule, TranslatorOptions, UnresolvedWord,
    ValidationPolicy, ValidationReport,
};
