// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use itf_translator::app_config::{self, Config};
use itf_translator::{Controller, Language, ModelPreset, RunOutcome, TextEncoding};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for TextEncoding to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliEncoding {
    Latin1,
    Utf8,
}

impl From<CliEncoding> for TextEncoding {
    fn from(cli_encoding: CliEncoding) -> Self {
        match cli_encoding {
            CliEncoding::Latin1 => TextEncoding::Latin1,
            CliEncoding::Utf8 => TextEncoding::Utf8,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate an ITF file or every ITF file in a directory
    Translate(TranslateArgs),

    /// List the words of an ITF file missing from the dictionary
    Validate(CommonArgs),

    /// Generate shell completions for itf-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by translate and validate
#[derive(Args, Debug)]
struct CommonArgs {
    /// Input ITF file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Source language code (de, fr, it)
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (de, fr, it)
    #[arg(short, long)]
    target_language: Option<String>,

    /// Dictionary file (german;french;italian rows)
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Model preset supplying override rules (DM01AVCH, MD01MOVD)
    #[arg(short, long)]
    preset: Option<String>,

    /// Encoding of the source file
    #[arg(long, value_enum)]
    read_encoding: Option<CliEncoding>,

    /// Encoding of the translated file
    #[arg(long, value_enum)]
    write_encoding: Option<CliEncoding>,

    /// Let override rules satisfy validation
    #[arg(long)]
    consult_rules: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translate even when validation reports unresolved words
    #[arg(long)]
    skip_validation: bool,
}

/// itf-translator - Language translator for INTERLIS 1 transfer files
#[derive(Parser, Debug)]
#[command(name = "itf-translator")]
#[command(version)]
#[command(about = "Translate INTERLIS 1 transfer files between German, French and Italian")]
#[command(long_about = "itf-translator rewrites the model, topic and table names of INTERLIS 1
transfer (ITF) files using a word dictionary and topic-dependent override rules.

EXAMPLES:
    itf-translator validate -s de -t fr -d translations.txt survey.itf
    itf-translator translate -s de -t fr -p DM01AVCH survey.itf
    itf-translator translate -f -o out/ /data/itf/
    itf-translator completions bash > itf-translator.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "itf-translator", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args),
        Commands::Validate(args) => run_validate(args),
    }
}

// Load the config file and apply the command line overrides
fn load_config(options: &CommonArgs) -> Result<Config> {
    if let Some(level) = &options.log_level {
        log::set_max_level(app_config::LogLevel::from(level.clone()).to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(dictionary) = &options.dictionary {
        config.dictionary_path = Some(dictionary.clone());
    }
    if let Some(preset) = &options.preset {
        config.preset = Some(preset.parse::<ModelPreset>()?);
    }
    if let Some(encoding) = options.read_encoding {
        config.encoding.read = encoding.into();
    }
    if let Some(encoding) = options.write_encoding {
        config.encoding.write = encoding.into();
    }
    if options.consult_rules {
        config.validation.consult_rules = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.common)?;
    if options.skip_validation {
        config.validation.require_clean = false;
    }

    let controller = Controller::with_config(config)?;
    let input_path = &options.common.input_path;

    if input_path.is_file() {
        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| input_path.parent().unwrap_or(Path::new(".")).to_path_buf());

        match controller.run(input_path, output_dir, options.force_overwrite)? {
            RunOutcome::Refused => Err(anyhow!("Language pair is not translatable")),
            _ => Ok(()),
        }
    } else if input_path.is_dir() {
        if options.output_dir.is_some() {
            warn!("--output-dir is ignored for directories, files are written next to their source");
        }
        let summary = controller.run_folder(input_path, options.force_overwrite)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) could not be translated", summary.failed));
        }
        Ok(())
    } else {
        Err(anyhow!("Input path does not exist: {:?}", input_path))
    }
}

fn run_validate(options: CommonArgs) -> Result<()> {
    let config = load_config(&options)?;
    let (from, to) = config.language_pair()?;
    let controller = Controller::with_config(config)?;

    let report = controller.validate_file(&options.input_path)?;
    if report.is_translatable() {
        info!(
            "{:?} is translatable from {} to {} ({} markers checked)",
            options.input_path,
            Language::name(from),
            Language::name(to),
            report.markers_checked
        );
        return Ok(());
    }

    for word in report.unresolved() {
        println!("{}", word);
    }
    Err(anyhow!("{} unresolved word(s) in {:?}", report.unresolved().len(), options.input_path))
}
