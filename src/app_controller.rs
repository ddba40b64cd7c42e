use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType, ITF_EXTENSION};
use crate::language_utils::Language;
use crate::translation::{ItfTranslator, ValidationReport};

// @module: Application controller for ITF translation

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Translated file written to the given path
    Translated(PathBuf),
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
    /// The language pair is disabled
    Refused,
}

/// Counts of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for ITF translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Engine built from the configuration
    translator: ItfTranslator,
    // @field: Configured language pair
    languages: (Language, Language),
    // @field: Whether folder runs draw a progress bar
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let translator = ItfTranslator::new(config.dictionary_file()?, config.rule_set())
            .with_options(config.translator_options()?);
        let languages = config.language_pair()?;

        Ok(Self {
            config,
            translator,
            languages,
            show_progress: true,
        })
    }

    /// Enable or disable the folder progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &ItfTranslator {
        &self.translator
    }

    /// Validate a file against the configured dictionary
    pub fn validate_file<P: AsRef<Path>>(&self, input_file: P) -> Result<ValidationReport> {
        let input_file = input_file.as_ref();
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let (from, to) = self.languages;
        self.translator
            .validate(input_file, from, to)
            .with_context(|| format!("Failed to validate {:?}", input_file))
    }

    /// Translate one file into `output_dir`
    pub fn run<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        input_file: P1,
        output_dir: P2,
        force_overwrite: bool,
    ) -> Result<RunOutcome> {
        let (input_file, output_dir) = (input_file.as_ref(), output_dir.as_ref());
        let start_time = Instant::now();

        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        if FileManager::detect_file_type(input_file)? != FileType::Itf {
            warn!("{:?} does not look like an INTERLIS 1 transfer file", input_file);
        }

        FileManager::ensure_dir(output_dir)?;

        let output_path = self.output_path(input_file, output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, translation already exists (use -f to force overwrite): {:?}", output_path);
            return Ok(RunOutcome::Skipped(output_path));
        }

        let (from, to) = self.languages;
        let result = if self.config.validation.require_clean {
            self.translator.translate_checked(input_file, &output_path, from, to)
        } else {
            self.translator.translate(input_file, &output_path, from, to)
        };
        let translated = result.with_context(|| format!("Failed to translate {:?}", input_file))?;

        if !translated {
            warn!("Translation from {} to {} is disabled", from.name(), to.name());
            return Ok(RunOutcome::Refused);
        }

        info!("Success: {:?} ({})", output_path, Self::format_duration(start_time.elapsed()));
        Ok(RunOutcome::Translated(output_path))
    }

    /// Translate every `.itf` file below `input_dir`, next to its source
    pub fn run_folder<P: AsRef<Path>>(&self, input_dir: P, force_overwrite: bool) -> Result<FolderSummary> {
        let input_dir = input_dir.as_ref();
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        // Sources are always `.itf`; `output_extension` only names the outputs
        let itf_files: Vec<PathBuf> = FileManager::find_files(input_dir, ITF_EXTENSION)?
            .into_iter()
            .filter(|path| !self.is_generated_output(path))
            .collect();

        if itf_files.is_empty() {
            return Err(anyhow!("No ITF files found in directory: {:?}", input_dir));
        }
        debug!("Found {} ITF file(s) in {:?}", itf_files.len(), input_dir);

        let folder_pb = self.folder_progress_bar(itf_files.len() as u64);
        let mut summary = FolderSummary::default();

        for itf_file in &itf_files {
            let file_name = itf_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = itf_file.parent().unwrap_or(input_dir);
            match self.run(itf_file, output_dir, force_overwrite) {
                Ok(RunOutcome::Translated(_)) => summary.translated += 1,
                Ok(RunOutcome::Skipped(_)) => summary.skipped += 1,
                Ok(RunOutcome::Refused) => summary.failed += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} translated, {} skipped, {} errors ({})",
            summary.translated,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Path the translation of `input_file` is written to
    pub fn output_path(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(
            input_file,
            output_dir,
            self.languages.1.code(),
            &self.config.output_extension,
        )
    }

    // Sources named `<stem>.<target>.itf` come from an earlier run, whatever the output extension
    fn is_generated_output(&self, path: &Path) -> bool {
        path.file_stem()
            .and_then(|stem| Path::new(stem).extension())
            .is_some_and(|lang| lang.to_string_lossy() == self.languages.1.code())
    }

    fn folder_progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let folder_pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("█▓▒░"));
        folder_pb
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
