/*!
 * Translator engine for INTERLIS 1 transfer (ITF) files.
 *
 * A single pass reads the source line by line. Lines starting with one of the
 * structural markers (`MODL`, `TOPI`, `TABL`) have their identifier replaced,
 * everything else is copied through untouched.
 */

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::encoding::{EncodingPolicy, TextEncoding};
use crate::errors::{TranslatorError, TranslatorResult};
use crate::language_utils::Language;

use super::dictionary::{Dictionary, LookupMode};
use super::markers::{MarkerLine, TranslationContext};
use super::rules::RuleSet;
use super::validation::{ValidationPolicy, ValidationReport};

/// Tunables of the translator engine
#[derive(Debug, Clone, Default)]
pub struct TranslatorOptions {
    /// Encodings of the source and output files
    pub encoding: EncodingPolicy,

    /// Encoding of the dictionary resource
    pub dictionary_encoding: TextEncoding,

    /// Behaviour of dictionary lookups during `translate`
    pub lookup_mode: LookupMode,

    /// Whether validation consults override rules
    pub validation: ValidationPolicy,

    /// Language pairs refused by [`ItfTranslator::is_translatable`]
    pub disabled_pairs: Vec<(Language, Language)>,
}

/// Generic translator of ITF files
#[derive(Debug, Clone)]
pub struct ItfTranslator {
    dictionary_path: PathBuf,
    rules: RuleSet,
    options: TranslatorOptions,
}

// One line of input split from its terminator (`\n`, `\r\n`, lone `\r` or none)
struct RawLine<'a> {
    body: &'a [u8],
    terminator: &'a [u8],
}

impl<'a> RawLine<'a> {
    fn split(buf: &'a [u8]) -> Self {
        let body_len = if buf.ends_with(b"\r\n") {
            buf.len() - 2
        } else if buf.ends_with(b"\n") || buf.ends_with(b"\r") {
            buf.len() - 1
        } else {
            buf.len()
        };
        let (body, terminator) = buf.split_at(body_len);
        Self { body, terminator }
    }
}

// Append the next line, terminator included, to `buf`. Returns the bytes read.
fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<usize> {
    let start = buf.len();
    loop {
        let (used, done) = {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            // A CR ended the previous chunk, it may be followed by LF
            if buf.len() > start && buf.ends_with(b"\r") {
                if available[0] == b'\n' {
                    buf.push(b'\n');
                    (1, true)
                } else {
                    (0, true)
                }
            } else {
                match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                    Some(i) => {
                        buf.extend_from_slice(&available[..=i]);
                        (i + 1, available[i] == b'\n')
                    }
                    None => {
                        buf.extend_from_slice(available);
                        (available.len(), false)
                    }
                }
            }
        };
        reader.consume(used);
        if done {
            break;
        }
    }
    Ok(buf.len() - start)
}

impl ItfTranslator {
    /// Create a translator for the given dictionary and override rules
    pub fn new<P: AsRef<Path>>(dictionary_path: P, rules: RuleSet) -> Self {
        Self {
            dictionary_path: dictionary_path.as_ref().to_path_buf(),
            rules,
            options: TranslatorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TranslatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dictionary_path(&self) -> &Path {
        &self.dictionary_path
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// Whether the engine accepts this language pair at all.
    ///
    /// Identity pairs and pairs listed in `disabled_pairs` are refused.
    pub fn is_translatable(&self, from: Language, to: Language) -> bool {
        from != to && !self.options.disabled_pairs.contains(&(from, to))
    }

    /// Load the dictionary for a language pair
    pub fn load_dictionary(&self, from: Language, to: Language) -> TranslatorResult<Dictionary> {
        let dictionary =
            Dictionary::from_file_with_encoding(&self.dictionary_path, from, to, self.options.dictionary_encoding)?;
        Ok(dictionary.with_mode(self.options.lookup_mode))
    }

    /// Translate `source` into `output`.
    ///
    /// Returns `Ok(false)` without touching any file when the language pair is
    /// refused. A lookup miss aborts the pass and may leave a partial output.
    pub fn translate<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        source: P1,
        output: P2,
        from: Language,
        to: Language,
    ) -> TranslatorResult<bool> {
        if !self.is_translatable(from, to) {
            warn!("Language pair {} -> {} is not translatable", from, to);
            return Ok(false);
        }

        let dictionary = self.load_dictionary(from, to)?;
        self.translate_with_dictionary(&dictionary, source, output)
    }

    /// Translate `source` into `output` with an already loaded dictionary
    pub fn translate_with_dictionary<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        dictionary: &Dictionary,
        source: P1,
        output: P2,
    ) -> TranslatorResult<bool> {
        let (source, output) = (source.as_ref(), output.as_ref());
        let (from, to) = (dictionary.source(), dictionary.target());
        if !self.is_translatable(from, to) {
            warn!("Language pair {} -> {} is not translatable", from, to);
            return Ok(false);
        }

        ensure_distinct(source, output)?;

        let reader = BufReader::new(File::open(source).map_err(|e| TranslatorError::io(source, e))?);
        let mut writer = BufWriter::new(File::create(output).map_err(|e| TranslatorError::io(output, e))?);

        let markers = self.translate_stream(dictionary, reader, &mut writer).map_err(|e| with_path(e, source, output))?;
        writer.flush().map_err(|e| TranslatorError::io(output, e))?;

        info!("Translated {:?} ({} -> {}, {} markers) into {:?}", source, from, to, markers, output);
        Ok(true)
    }

    /// Translate ITF content from `reader` into `writer`.
    ///
    /// Returns the number of marker lines rewritten.
    pub fn translate_stream<R: BufRead, W: Write>(
        &self,
        dictionary: &Dictionary,
        mut reader: R,
        writer: &mut W,
    ) -> TranslatorResult<usize> {
        let (from, to) = (dictionary.source(), dictionary.target());
        let policy = self.options.encoding;
        let mut context = TranslationContext::new();
        let mut buf = Vec::new();
        let mut markers = 0;

        loop {
            buf.clear();
            if read_raw_line(&mut reader, &mut buf).map_err(read_error)? == 0 {
                break;
            }

            let raw = RawLine::split(&buf);
            let line = policy.read.decode(raw.body)?;

            match MarkerLine::detect(&line) {
                Some(found) => {
                    context.enter(found.marker, found.identifier);

                    let translation = match self.rules.resolve(from, to, context.topic(), context.table()) {
                        Some(replacement) => replacement,
                        None => dictionary.lookup(found.identifier)?,
                    };

                    let rewritten = found.substitute(&line, translation);
                    writer.write_all(&policy.write.encode(&rewritten)?).map_err(write_error)?;
                    markers += 1;
                }
                None if policy.read == policy.write => {
                    writer.write_all(raw.body).map_err(write_error)?;
                }
                None => {
                    writer.write_all(&policy.write.encode(&line)?).map_err(write_error)?;
                }
            }
            writer.write_all(raw.terminator).map_err(write_error)?;
        }

        Ok(markers)
    }

    /// Check that every marker identifier of `source` can be translated.
    ///
    /// Misses are collected, never raised; the whole file is always scanned.
    pub fn validate<P: AsRef<Path>>(&self, source: P, from: Language, to: Language) -> TranslatorResult<ValidationReport> {
        let dictionary = self.load_dictionary(from, to)?;
        self.validate_with_dictionary(&dictionary, source)
    }

    /// Validate `source` with an already loaded dictionary
    pub fn validate_with_dictionary<P: AsRef<Path>>(
        &self,
        dictionary: &Dictionary,
        source: P,
    ) -> TranslatorResult<ValidationReport> {
        let source = source.as_ref();
        let reader = BufReader::new(File::open(source).map_err(|e| TranslatorError::io(source, e))?);
        let report = self.validate_stream(dictionary, reader).map_err(|e| with_path(e, source, source))?;

        for word in report.unresolved() {
            warn!("Error, key not found: {} {} (line {})", word.marker, word.identifier, word.line);
        }
        debug!(
            "Validated {:?}: {} markers, {} unresolved",
            source,
            report.markers_checked,
            report.unresolved().len()
        );

        Ok(report)
    }

    /// Validate ITF content from `reader`
    pub fn validate_stream<R: BufRead>(&self, dictionary: &Dictionary, mut reader: R) -> TranslatorResult<ValidationReport> {
        let (from, to) = (dictionary.source(), dictionary.target());
        let mut context = TranslationContext::new();
        let mut report = ValidationReport::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if read_raw_line(&mut reader, &mut buf).map_err(read_error)? == 0 {
                break;
            }
            line_number += 1;

            let line = self.options.encoding.read.decode(RawLine::split(&buf).body)?;
            let Some(found) = MarkerLine::detect(&line) else {
                continue;
            };

            context.enter(found.marker, found.identifier);
            report.markers_checked += 1;

            if self.options.validation == ValidationPolicy::RulesThenDictionary
                && self.rules.resolve(from, to, context.topic(), context.table()).is_some()
            {
                continue;
            }
            if !dictionary.contains(found.identifier) {
                report.record(found.marker, found.identifier, line_number);
            }
        }

        Ok(report)
    }

    /// Validate first and translate only when nothing is unresolved
    pub fn translate_checked<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        source: P1,
        output: P2,
        from: Language,
        to: Language,
    ) -> TranslatorResult<bool> {
        if !self.is_translatable(from, to) {
            warn!("Language pair {} -> {} is not translatable", from, to);
            return Ok(false);
        }

        let dictionary = self.load_dictionary(from, to)?;
        let report = self.validate_with_dictionary(&dictionary, source.as_ref())?;
        if !report.is_translatable() {
            return Err(TranslatorError::Untranslatable {
                unresolved: report.into_unresolved(),
            });
        }

        self.translate_with_dictionary(&dictionary, source, output)
    }
}

fn ensure_distinct(source: &Path, output: &Path) -> TranslatorResult<()> {
    let source = fs::canonicalize(source).map_err(|e| TranslatorError::io(source, e))?;
    if let Ok(output) = fs::canonicalize(output) {
        if output == source {
            return Err(TranslatorError::SameFile { path: source });
        }
    }
    Ok(())
}

// Stream errors carry a placeholder path until the caller knows the file
const INPUT_LABEL: &str = "<input>";
const OUTPUT_LABEL: &str = "<output>";

fn read_error(source: std::io::Error) -> TranslatorError {
    TranslatorError::io(INPUT_LABEL, source)
}

fn write_error(source: std::io::Error) -> TranslatorError {
    TranslatorError::io(OUTPUT_LABEL, source)
}

fn with_path(error: TranslatorError, source: &Path, output: &Path) -> TranslatorError {
    match error {
        TranslatorError::Io { path, source: inner } if path == Path::new(INPUT_LABEL) => TranslatorError::io(source, inner),
        TranslatorError::Io { path, source: inner } if path == Path::new(OUTPUT_LABEL) => TranslatorError::io(output, inner),
        other => other,
    }
}
