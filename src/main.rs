// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::spreadsheet::ColumnSelector;

mod app_config;
mod app_controller;
mod database;
mod errors;
mod language_utils;
mod pipeline;
mod providers;
mod quality;
mod spreadsheet;
mod translation;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input CSV file holding the sentences
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Column with the sentences: header name or 0-based index
    #[arg(short, long, default_value = "0")]
    column: String,

    /// Source language code (e.g. 'ko', 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'en', 'ja')
    #[arg(short, long)]
    target_language: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full round-trip pipeline and append scored records
    Generate(InputArgs),

    /// Forward-translate a column and print the results
    Translate(InputArgs),

    /// List the supported languages and the configured defaults
    Languages,

    /// Show dataset store statistics
    Stats,

    /// Generate shell completions for backtrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// backtrans - quality-scored back-translation dataset pipeline
///
/// Forward-translates sentences, translates them back, scores the round
/// trip, and appends one record per sentence to a SQLite dataset.
#[derive(Parser, Debug)]
#[command(name = "backtrans")]
#[command(version = "1.0.0")]
#[command(about = "Quality-scored back-translation dataset pipeline")]
#[command(long_about = "backtrans builds translation training datasets by translating sentences
forward and back, scoring round-trip fidelity, and appending one scored
record per sentence to a SQLite dataset.

EXAMPLES:
    backtrans generate input.csv --column sentence      # Full pipeline on the 'sentence' column
    backtrans generate input.csv -c 2 -s ja -t en       # Column by index, explicit languages
    backtrans translate input.csv -c sentence           # Forward-only, printed to stdout
    backtrans languages                                 # Show the supported language set
    backtrans stats                                     # Dataset record counts
    backtrans completions bash > backtrans.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the level is adjusted once config and CLI flags
    // are reconciled
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        log::set_max_level(level.clone().into());
    }

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "backtrans", &mut std::io::stdout());
            Ok(())
        }
        Commands::Generate(args) => {
            let controller = build_controller(&cli)?;
            let column = parse_column(&args.column);
            controller
                .run_generate(
                    &args.input_file,
                    &column,
                    args.source_language.as_deref(),
                    args.target_language.as_deref(),
                )
                .await
        }
        Commands::Translate(args) => {
            let controller = build_controller(&cli)?;
            let column = parse_column(&args.column);
            controller
                .run_translate(
                    &args.input_file,
                    &column,
                    args.source_language.as_deref(),
                    args.target_language.as_deref(),
                )
                .await
        }
        Commands::Languages => build_controller(&cli)?.show_languages(),
        Commands::Stats => build_controller(&cli)?.show_stats(),
    }
}

fn parse_column(selector: &str) -> ColumnSelector {
    // The parse is infallible; a non-numeric selector is a header name
    selector
        .parse()
        .unwrap_or_else(|_| ColumnSelector::Name(selector.to_string()))
}

fn build_controller(cli: &CommandLineOptions) -> Result<Controller> {
    let config = load_config(&cli.config_path)?;

    // Without an explicit CLI level, the config decides
    if cli.log_level.is_none() {
        let level = match config.log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(level);
    }

    Controller::with_config(config)
}

fn load_config(config_path: &str) -> Result<Config> {
    if !Path::new(config_path).exists() {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config
            .save(config_path)
            .with_context(|| format!("Failed to write default config to file: {}", config_path))?;
        return Ok(config);
    }

    Config::load_or_default(config_path)
}
