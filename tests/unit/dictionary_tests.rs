/*!
 * Tests for dictionary loading and lookup
 */

use anyhow::Result;
use itf_translator::translation::{Dictionary, LookupMode};
use itf_translator::{Language, TextEncoding, TranslatorError};
use crate::common;

/// Test that a dictionary file maps the requested columns
#[test]
fn test_fromFile_withGermanToFrench_shouldMapColumns() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_dictionary(temp_dir.path())?;

    let dictionary = Dictionary::from_file(&path, Language::German, Language::French)?;

    assert_eq!(dictionary.translate("Linienobjekt")?, "Element_lineaire");
    assert_eq!(dictionary.translate("Bodenbedeckung")?, "Couverture_du_sol");
    assert_eq!(dictionary.source(), Language::German);
    assert_eq!(dictionary.target(), Language::French);

    Ok(())
}

/// Test that duplicate source words resolve to the last row
#[test]
fn test_fromFile_withDuplicateSourceWords_shouldKeepLastRow() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_dictionary(temp_dir.path())?;

    // "Bords_de_plan" is listed twice in the French column
    let dictionary = Dictionary::from_file(&path, Language::French, Language::German)?;
    assert_eq!(dictionary.translate("Bords_de_plan")?, "Planrahmen");

    Ok(())
}

/// Test that a missing dictionary file is an I/O error naming the file
#[test]
fn test_fromFile_withMissingFile_shouldReturnIoError() {
    let result = Dictionary::from_file("does/not/exist.txt", Language::German, Language::French);

    match result {
        Err(TranslatorError::Io { path, .. }) => assert!(path.ends_with("exist.txt")),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

/// Test that a Latin-1 dictionary decodes accented words
#[test]
fn test_fromFileWithEncoding_withLatin1Dictionary_shouldDecodeAccents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_bytes(
        temp_dir.path(),
        "latin1.txt",
        &common::latin1("Flaeche;Surface;Superficie\nGebäude;Bâtiment;Edificio\n"),
    )?;

    let dictionary = Dictionary::from_file_with_encoding(&path, Language::German, Language::French, TextEncoding::Latin1)?;
    assert_eq!(dictionary.translate("Gebäude")?, "Bâtiment");

    // The same bytes are not valid UTF-8
    assert!(Dictionary::from_file(&path, Language::German, Language::French).is_err());

    Ok(())
}

/// Test that strict and permissive lookups differ only on misses
#[test]
fn test_lookup_withBothModes_shouldDifferOnlyOnMiss() -> Result<()> {
    let strict = Dictionary::parse(common::TEST_DICTIONARY, Language::German, Language::Italian)?;
    let permissive = strict.clone().with_mode(LookupMode::Permissive);

    assert_eq!(strict.lookup("BoFlaeche")?, "Superficie_CS");
    assert_eq!(permissive.lookup("BoFlaeche")?, "Superficie_CS");

    assert!(strict.lookup("Gebaeude").unwrap_err().is_lookup_miss());
    assert_eq!(permissive.lookup("Gebaeude")?, "Gebaeude");

    Ok(())
}

/// Test that a dictionary saved with a byte order mark resolves its first row
#[test]
fn test_fromFile_withByteOrderMark_shouldResolveFirstWord() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut content = vec![0xEF, 0xBB, 0xBF];
    content.extend_from_slice(b"DM01AVCH24D;DM01AVCH24F;DM01AVCH24I\nBoFlaeche;Surface_CS;Superficie_CS\n");
    let path = common::create_test_bytes(temp_dir.path(), "bom.txt", &content)?;

    let dictionary = Dictionary::from_file(&path, Language::German, Language::French)?;
    assert_eq!(dictionary.translate("DM01AVCH24D")?, "DM01AVCH24F");
    assert_eq!(dictionary.len(), 2);

    Ok(())
}
