use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::encoding::{EncodingPolicy, TextEncoding};
use crate::language_utils::Language;
use crate::presets::ModelPreset;
use crate::translation::{LookupMode, RuleSet, TranslationRule, TranslatorOptions, ValidationPolicy};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Dictionary file; defaults to the preset's dictionary when unset
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,

    /// Model whose override rules are applied first
    #[serde(default)]
    pub preset: Option<ModelPreset>,

    /// Additional override rules, applied after the preset's rules
    #[serde(default)]
    pub rules: Vec<TranslationRule>,

    /// File encodings
    #[serde(default)]
    pub encoding: EncodingConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Language pairs that must not be translated, as [from, to] codes
    #[serde(default)]
    pub disabled_pairs: Vec<[String; 2]>,

    /// Extension of generated files
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Encodings of the files the translator touches
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EncodingConfig {
    /// Encoding of source ITF files
    #[serde(default = "default_read_encoding")]
    pub read: TextEncoding,

    /// Encoding of translated ITF files
    #[serde(default)]
    pub write: TextEncoding,

    /// Encoding of the dictionary file
    #[serde(default)]
    pub dictionary: TextEncoding,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        let policy = EncodingPolicy::legacy();
        Self {
            read: policy.read,
            write: policy.write,
            dictionary: TextEncoding::Utf8,
        }
    }
}

/// Validation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Let override rules satisfy validation, as they do during translation
    #[serde(default)]
    pub consult_rules: bool,

    /// Refuse to translate files with unresolved words
    #[serde(default = "default_true")]
    pub require_clean: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            consult_rules: false,
            require_clean: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_output_extension() -> String {
    "itf".to_string()
}

fn default_read_encoding() -> TextEncoding {
    TextEncoding::Latin1
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).context(format!("Failed to parse config file: {:?}", path))
    }

    /// Load the configuration, writing a default one when the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json).context(format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let (source, target) = self.language_pair()?;
        if source == target {
            return Err(anyhow!("Source and target language are both {}", source.name()));
        }

        self.dictionary_file()?;

        for [from, to] in &self.disabled_pairs {
            Language::from_code(from)?;
            Language::from_code(to)?;
        }

        if self.output_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("Output extension must not be empty"));
        }

        Ok(())
    }

    /// Source and target language
    pub fn language_pair(&self) -> Result<(Language, Language)> {
        let source = Language::from_code(&self.source_language)
            .with_context(|| format!("Invalid source language: {}", self.source_language))?;
        let target = Language::from_code(&self.target_language)
            .with_context(|| format!("Invalid target language: {}", self.target_language))?;
        Ok((source, target))
    }

    /// Dictionary file to load, falling back to the preset's dictionary
    pub fn dictionary_file(&self) -> Result<PathBuf> {
        match (&self.dictionary_path, self.preset) {
            (Some(path), _) if !path.as_os_str().is_empty() => Ok(path.clone()),
            (_, Some(preset)) => Ok(PathBuf::from(preset.default_dictionary_file())),
            _ => Err(anyhow!("No dictionary file configured and no model preset selected")),
        }
    }

    /// Preset rules followed by the configured rules
    pub fn rule_set(&self) -> RuleSet {
        let mut rules = self.preset.map(ModelPreset::rules).unwrap_or_default();
        rules.extend(self.rules.iter().cloned());
        rules
    }

    /// Engine options derived from this configuration
    pub fn translator_options(&self) -> Result<TranslatorOptions> {
        let disabled_pairs = self
            .disabled_pairs
            .iter()
            .map(|[from, to]| -> Result<(Language, Language)> {
                Ok((Language::from_code(from)?, Language::from_code(to)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TranslatorOptions {
            encoding: EncodingPolicy {
                read: self.encoding.read,
                write: self.encoding.write,
            },
            dictionary_encoding: self.encoding.dictionary,
            lookup_mode: LookupMode::Strict,
            validation: if self.validation.consult_rules {
                ValidationPolicy::RulesThenDictionary
            } else {
                ValidationPolicy::DictionaryOnly
            },
            disabled_pairs,
        })
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "de".to_string(),
            target_language: "fr".to_string(),
            dictionary_path: None,
            preset: Some(ModelPreset::Dm01avch),
            rules: Vec::new(),
            encoding: EncodingConfig::default(),
            validation: ValidationConfig::default(),
            disabled_pairs: Vec::new(),
            output_extension: default_output_extension(),
            log_level: LogLevel::default(),
        }
    }
}
