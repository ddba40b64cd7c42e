/*!
 * Tests for error display and conversion
 */

use std::io;
use std::path::PathBuf;
use itf_translator::translation::{Marker, UnresolvedWord};
use itf_translator::{AppError, TranslatorError};

/// Test messages shown to the user
#[test]
fn test_translatorError_display_shouldNameTheCulprit() {
    let miss = TranslatorError::LookupMiss { word: "Gebaeude".to_string() };
    assert_eq!(miss.to_string(), "Key not found in dictionary: Gebaeude");
    assert!(miss.is_lookup_miss());

    let row = TranslatorError::MalformedDictionaryRow { line: 4, fields: 2, required: 3 };
    assert!(row.to_string().contains("line 4"));
    assert!(!row.is_lookup_miss());

    let untranslatable = TranslatorError::Untranslatable {
        unresolved: vec![UnresolvedWord {
            marker: Marker::Table,
            identifier: "Flurname".to_string(),
            line: 3,
        }],
    };
    assert_eq!(untranslatable.to_string(), "File is not translatable, 1 unresolved word(s)");
}

/// Test that I/O errors keep their source
#[test]
fn test_translatorError_io_shouldKeepPathAndSource() {
    let err = TranslatorError::io("survey.itf", io::Error::new(io::ErrorKind::NotFound, "gone"));
    match &err {
        TranslatorError::Io { path, .. } => assert_eq!(path, &PathBuf::from("survey.itf")),
        other => panic!("expected Io, got {:?}", other),
    }
    assert!(std::error::Error::source(&err).is_some());
}

/// Test conversions into the application error
#[test]
fn test_appError_from_shouldSortErrorsIntoVariants() {
    let from_translator: AppError = TranslatorError::UnknownPreset("XX".to_string()).into();
    assert!(matches!(from_translator, AppError::Translation(TranslatorError::UnknownPreset(_))));

    let from_anyhow: AppError = anyhow::Error::new(TranslatorError::UnsupportedLanguage("en".to_string())).into();
    assert!(matches!(from_anyhow, AppError::Translation(TranslatorError::UnsupportedLanguage(_))));

    let from_message: AppError = anyhow::anyhow!("something else").into();
    assert!(matches!(from_message, AppError::Unknown(ref msg) if msg == "something else"));

    let from_io: AppError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    assert!(matches!(from_io, AppError::File(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let from_json: AppError = json_error.into();
    assert!(matches!(from_json, AppError::Config(_)));
}
