use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::TranslatorError;
use crate::language_utils::Language;
use crate::translation::{RuleSet, TranslationRule};

// @module: Override rules shipped for the official cadastral survey models

// Topic-dependent tables of the cadastral survey data models
static CADASTRAL_SURVEY_RULES: Lazy<Vec<TranslationRule>> = Lazy::new(|| {
    use Language::{French, German, Italian};

    vec![
        // FR->DE
        TranslationRule::new(French, German, "Bords_de_plan", "Element_lineaire", "Linienobjekt"),
        // IT->DE
        TranslationRule::new(Italian, German, "Margine_del_piano", "Elemento_lineare", "Linienobjekt"),
        // DE->FR
        TranslationRule::new(German, French, "Bodenbedeckung", "Objektname", "Nom_objet"),
        TranslationRule::new(German, French, "Bodenbedeckung", "ObjektnamePos", "PosNom_objet"),
        // IT->FR
        TranslationRule::new(Italian, French, "Copertura_del_suolo", "Nome_Oggetto", "Nom_objet"),
        TranslationRule::new(Italian, French, "Copertura_del_suolo", "PosNome_Oggetto", "PosNom_objet"),
    ]
});

/// Data model a set of override rules and a dictionary file belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelPreset {
    /// DM01AVCH, the national cadastral survey model
    #[serde(rename = "DM01AVCH", alias = "dm01avch")]
    Dm01avch,
    /// MD01MOVD, the canton Vaud extension of DM01AVCH
    #[serde(rename = "MD01MOVD", alias = "md01movd")]
    Md01movd,
}

impl ModelPreset {
    pub const ALL: [ModelPreset; 2] = [ModelPreset::Dm01avch, ModelPreset::Md01movd];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dm01avch => "DM01AVCH",
            Self::Md01movd => "MD01MOVD",
        }
    }

    /// File name of the dictionary distributed with the model
    pub fn default_dictionary_file(self) -> &'static str {
        match self {
            Self::Dm01avch => "translations_DM01AVCH.txt",
            Self::Md01movd => "translations_MD01MOVD.txt",
        }
    }

    /// Override rules of the model
    pub fn rules(self) -> RuleSet {
        // MD01MOVD inherits the DM01AVCH topics unchanged
        match self {
            Self::Dm01avch | Self::Md01movd => CADASTRAL_SURVEY_RULES.iter().cloned().collect(),
        }
    }
}

impl fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelPreset {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TranslatorError::UnknownPreset(s.to_string()))
    }
}
