/*!
 * Tests for the translator engine on files
 */

use std::fs;
use anyhow::Result;
use itf_translator::translation::{ItfTranslator, RuleSet, TranslationRule, TranslatorOptions};
use itf_translator::{EncodingPolicy, Language, Marker, TextEncoding, TranslatorError};
use crate::common;

fn special_name_rule() -> TranslationRule {
    TranslationRule::new(Language::German, Language::French, "Bodenbedeckung", "Linienobjekt", "Special_Name")
}

/// Test the plain dictionary case of a table marker
#[test]
fn test_translate_withoutRules_shouldUseDictionaryEntry() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_file(temp_dir.path(), "in.itf", "TABL Linienobjekt\n")?;
    let output = temp_dir.path().join("out.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    assert!(translator.translate(&source, &output, Language::German, Language::French)?);

    assert_eq!(fs::read_to_string(&output)?, "TABL Element_lineaire\n");
    Ok(())
}

/// Test that a matching rule wins over the dictionary
#[test]
fn test_translate_withMatchingRule_shouldUseRuleReplacement() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_file(temp_dir.path(), "in.itf", "TOPI Bodenbedeckung\nTABL Linienobjekt\n")?;
    let output = temp_dir.path().join("out.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::from(vec![special_name_rule()]));
    assert!(translator.translate(&source, &output, Language::German, Language::French)?);

    assert_eq!(fs::read_to_string(&output)?, "TOPI Couverture_du_sol\nTABL Special_Name\n");
    Ok(())
}

/// Test that a rule only applies inside the topic it names
#[test]
fn test_translate_withRuleForOtherTopic_shouldUseDictionary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let content = "\
TOPI Bodenbedeckung
TABL Linienobjekt
ETAB
TOPI Einzelobjekte
TABL Linienobjekt
ETAB
MODL DM01AVCH24D
TABL Linienobjekt
";
    let source = common::create_test_file(temp_dir.path(), "in.itf", content)?;
    let output = temp_dir.path().join("out.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::from(vec![special_name_rule()]));
    translator.translate(&source, &output, Language::German, Language::French)?;

    let translated = fs::read_to_string(&output)?;
    let tables: Vec<&str> = translated.lines().filter(|l| l.starts_with("TABL")).collect();
    assert_eq!(tables, vec!["TABL Special_Name", "TABL Element_lineaire", "TABL Element_lineaire"]);
    Ok(())
}

/// Test that context from one pass does not leak into the next
#[test]
fn test_translate_withConsecutiveFiles_shouldResetContext() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let first = common::create_test_file(temp_dir.path(), "first.itf", "TOPI Bodenbedeckung\n")?;
    let second = common::create_test_file(temp_dir.path(), "second.itf", "TABL Linienobjekt\n")?;

    let translator = ItfTranslator::new(&dictionary, RuleSet::from(vec![special_name_rule()]));
    translator.translate(&first, temp_dir.path().join("first.fr.itf"), Language::German, Language::French)?;
    translator.translate(&second, temp_dir.path().join("second.fr.itf"), Language::German, Language::French)?;

    assert_eq!(fs::read_to_string(temp_dir.path().join("second.fr.itf"))?, "TABL Element_lineaire\n");
    Ok(())
}

/// Test that non-marker lines are copied byte for byte
#[test]
fn test_translate_withPreservingEncoding_shouldCopyOtherLinesVerbatim() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let content = "SCNT\r\nGemeinde Mörel\r\n\r\nTABL BoFlaeche\r\nOBJE 1 Gebäude  BoFlaeche\t7\r\nETAB";
    let source = common::create_test_bytes(temp_dir.path(), "in.itf", &common::latin1(content))?;
    let output = temp_dir.path().join("out.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::new()).with_options(TranslatorOptions {
        encoding: EncodingPolicy::preserving(),
        ..TranslatorOptions::default()
    });
    translator.translate(&source, &output, Language::German, Language::French)?;

    let expected = content.replace("TABL BoFlaeche", "TABL Surface_CS");
    assert_eq!(fs::read(&output)?, common::latin1(&expected));
    Ok(())
}

/// Test that files using lone CR line ends are translated line by line
#[test]
fn test_translate_withCarriageReturnLineEnds_shouldRewriteEveryMarker() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let content = "MODL DM01AVCH24D\rTOPI Bodenbedeckung\rTABL BoFlaeche\rOBJE 1 Gebäude\rETAB\r";
    let source = common::create_test_bytes(temp_dir.path(), "mac.itf", &common::latin1(content))?;
    let output = temp_dir.path().join("mac.fr.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::new()).with_options(TranslatorOptions {
        encoding: EncodingPolicy::preserving(),
        ..TranslatorOptions::default()
    });
    translator.translate(&source, &output, Language::German, Language::French)?;

    let expected = "MODL DM01AVCH24F\rTOPI Couverture_du_sol\rTABL Surface_CS\rOBJE 1 Gebäude\rETAB\r";
    assert_eq!(fs::read(&output)?, common::latin1(expected));
    Ok(())
}

/// Test that the legacy policy reads Latin-1 and writes UTF-8
#[test]
fn test_translate_withLegacyEncoding_shouldTranscodeToUtf8() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_itf(temp_dir.path(), "survey.itf")?;
    let output = temp_dir.path().join("survey.fr.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    assert_eq!(translator.options().encoding, EncodingPolicy::legacy());
    translator.translate(&source, &output, Language::German, Language::French)?;

    let translated = fs::read_to_string(&output)?;
    assert!(translated.contains("Testdaten Gemeinde Mörel\n"));
    assert!(translated.contains("MODL DM01AVCH24F\n"));
    assert!(translated.contains("TABL Nom\n"));
    assert!(translated.contains("OBJE 2 Objekt Objektname\n"));
    Ok(())
}

/// Test that only the identifier token is replaced
#[test]
fn test_translate_withIdentifierRepeatedOnLine_shouldReplaceOnlyIdentifier() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_file(temp_dir.path(), "in.itf", "TABL Objektname ObjektnamePos Objektname\n")?;
    let output = temp_dir.path().join("out.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    translator.translate(&source, &output, Language::German, Language::French)?;

    assert_eq!(fs::read_to_string(&output)?, "TABL Nom ObjektnamePos Objektname\n");
    Ok(())
}

/// Test that a lookup miss aborts the translation
#[test]
fn test_translate_withUnknownIdentifier_shouldFailWithLookupMiss() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_file(temp_dir.path(), "in.itf", "TOPI Bodenbedeckung\nTABL Gebaeude\nTABL BoFlaeche\n")?;
    let output = temp_dir.path().join("out.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    let err = translator.translate(&source, &output, Language::German, Language::French).unwrap_err();

    assert!(matches!(err, TranslatorError::LookupMiss { ref word } if word == "Gebaeude"));
    Ok(())
}

/// Test that a refused language pair leaves the file system untouched
#[test]
fn test_translate_withIdentityPair_shouldReturnFalseWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_file(temp_dir.path(), "in.itf", "TABL Linienobjekt\n")?;
    let output = temp_dir.path().join("out.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    assert!(!translator.translate(&source, &output, Language::German, Language::German)?);
    assert!(!output.exists());
    Ok(())
}

/// Test that translating a file onto itself is refused
#[test]
fn test_translate_withOutputEqualToSource_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_file(temp_dir.path(), "in.itf", "TABL Linienobjekt\n")?;

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    let err = translator.translate(&source, &source, Language::German, Language::French).unwrap_err();

    assert!(matches!(err, TranslatorError::SameFile { .. }));
    assert_eq!(fs::read_to_string(&source)?, "TABL Linienobjekt\n");
    Ok(())
}

/// Test that validation reports each distinct miss once
#[test]
fn test_validate_withMissingWords_shouldReportEveryDistinctMiss() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let content = "\
MODL DM01AVCH24D
TOPI Nomenklatur
TABL Flurname
ETAB
TABL Gelaendename
ETAB
TABL Flurname
ETAB
TOPI Bodenbedeckung
TABL BoFlaeche
";
    let source = common::create_test_file(temp_dir.path(), "in.itf", content)?;

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    let report = translator.validate(&source, Language::German, Language::French)?;

    assert!(!report.is_translatable());
    assert_eq!(report.markers_checked, 7);
    let unresolved: Vec<(Marker, &str, usize)> = report
        .unresolved()
        .iter()
        .map(|w| (w.marker, w.identifier.as_str(), w.line))
        .collect();
    assert_eq!(
        unresolved,
        vec![
            (Marker::Topic, "Nomenklatur", 2),
            (Marker::Table, "Flurname", 3),
            (Marker::Table, "Gelaendename", 5),
        ]
    );
    Ok(())
}

/// Test that a clean validation means translation succeeds
#[test]
fn test_validate_withCompleteDictionary_shouldAllowTranslation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_itf(temp_dir.path(), "survey.itf")?;

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    for to in [Language::French, Language::Italian] {
        let report = translator.validate(&source, Language::German, to)?;
        assert!(report.is_translatable());
        assert!(translator.translate(&source, temp_dir.path().join(format!("survey.{}.itf", to)), Language::German, to)?);
    }
    Ok(())
}

/// Test that validation ignores rules unless asked to consult them
#[test]
fn test_validate_withRuleOnlyIdentifier_shouldFollowPolicy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_file(temp_dir.path(), "in.itf", "TOPI Bodenbedeckung\nTABL Strasse\n")?;
    let rules = RuleSet::from(vec![TranslationRule::new(
        Language::German,
        Language::French,
        "Bodenbedeckung",
        "Strasse",
        "Route",
    )]);

    let legacy = ItfTranslator::new(&dictionary, rules.clone());
    assert!(!legacy.validate(&source, Language::German, Language::French)?.is_translatable());

    let consulting = ItfTranslator::new(&dictionary, rules).with_options(TranslatorOptions {
        validation: itf_translator::ValidationPolicy::RulesThenDictionary,
        ..TranslatorOptions::default()
    });
    assert!(consulting.validate(&source, Language::German, Language::French)?.is_translatable());
    Ok(())
}

/// Test that translate_checked refuses files with unresolved words before writing
#[test]
fn test_translateChecked_withMissingWords_shouldNotCreateOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary = common::create_test_dictionary(temp_dir.path())?;
    let source = common::create_test_file(temp_dir.path(), "in.itf", "TABL BoFlaeche\nTABL Gebaeude\n")?;
    let output = temp_dir.path().join("out.itf");

    let translator = ItfTranslator::new(&dictionary, RuleSet::new());
    let err = translator.translate_checked(&source, &output, Language::German, Language::French).unwrap_err();

    match err {
        TranslatorError::Untranslatable { unresolved } => {
            assert_eq!(unresolved.len(), 1);
            assert_eq!(unresolved[0].identifier, "Gebaeude");
        }
        other => panic!("expected Untranslatable, got {:?}", other),
    }
    assert!(!output.exists());
    Ok(())
}

/// Test that a loaded dictionary can be shared across threads
#[test]
fn test_translateWithDictionary_fromSeveralThreads_shouldTranslateEachFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dictionary_path = common::create_test_dictionary(temp_dir.path())?;
    let translator = ItfTranslator::new(&dictionary_path, RuleSet::new()).with_options(TranslatorOptions {
        encoding: EncodingPolicy::uniform(TextEncoding::Utf8),
        ..TranslatorOptions::default()
    });
    let dictionary = translator.load_dictionary(Language::German, Language::Italian)?;

    let sources = ["a", "b", "c"]
        .iter()
        .map(|name| common::create_test_file(temp_dir.path(), &format!("{}.itf", name), "TOPI Einzelobjekte\n"))
        .collect::<Result<Vec<_>>>()?;

    std::thread::scope(|scope| {
        for source in &sources {
            let (translator, dictionary) = (&translator, &dictionary);
            scope.spawn(move || translator.translate_with_dictionary(dictionary, source, source.with_extension("it.itf")));
        }
    });

    for source in &sources {
        assert_eq!(fs::read_to_string(source.with_extension("it.itf"))?, "TOPI Oggetti_singoli\n");
    }
    Ok(())
}
