// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use subcollate::app_config::{self, Config};
use subcollate::{Controller, RunOptions};

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract subtitle files from a directory tree (default command)
    Extract(ExtractArgs),

    /// Generate shell completions for subcollate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Source directory to search for subtitles
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Output directory (default from config: extracted_subtitles)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write formatted.md and raw.txt into the output directory
    #[arg(short, long)]
    consolidate: bool,

    /// Show what would be extracted without copying
    #[arg(long)]
    dry_run: bool,

    /// Configuration file path
    #[arg(long, default_value = "subcollate.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subcollate - gather course subtitles into one place
///
/// Finds subtitle files in nested course folders, copies them into a flat
/// directory and optionally builds a Markdown transcript and a raw
/// concatenation ordered by chapter and lesson.
#[derive(Parser, Debug)]
#[command(name = "subcollate")]
#[command(version)]
#[command(about = "Extract and consolidate subtitle files from nested directories")]
#[command(long_about = "subcollate finds subtitle files in nested course folders and copies them into one directory.

EXAMPLES:
    subcollate ~/courses/rust                   # Copy into ./extracted_subtitles
    subcollate ~/courses/rust -o subs           # Copy into ./subs
    subcollate ~/courses/rust -c                # Copy, then write formatted.md and raw.txt
    subcollate ~/courses/rust --dry-run         # Only list what would be copied
    subcollate completions bash > subcollate.bash

SUPPORTED EXTENSIONS:
    .srt .vtt .ass .ssa are parsed into text; .sub .sbv .ttml .scc .stl .sup
    .idx .usf are copied and read with a generic line filter.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source directory to search for subtitles
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Output directory (default from config: extracted_subtitles)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write formatted.md and raw.txt into the output directory
    #[arg(short, long)]
    consolidate: bool,

    /// Show what would be extracted without copying
    #[arg(long)]
    dry_run: bool,

    /// Configuration file path
    #[arg(long, default_value = "subcollate.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by log::max_level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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

fn main() -> Result<()> {
    // Info until the config or CLI says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subcollate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Extract(args)) => run_extract(args),
        None => {
            let source = match cli.source {
                Some(source) => source,
                None => {
                    CommandLineOptions::command().print_help()?;
                    return Ok(());
                }
            };

            run_extract(ExtractArgs {
                source,
                output: cli.output,
                consolidate: cli.consolidate,
                dry_run: cli.dry_run,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
        }
    }
}

fn load_config(options: &ExtractArgs) -> Result<Config> {
    let config_path: &Path = &options.config_path;
    if !config_path.exists() {
        debug!("Config file not found at {:?}, using defaults", config_path);
    }
    let mut config = Config::load_or_default(config_path)?;

    // Override config with CLI options if provided
    if let Some(output) = &options.output {
        config.output_dir = output.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn run_extract(options: ExtractArgs) -> Result<()> {
    // Apply the CLI level before the config is read so its messages obey it
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config)?;
    controller.run(
        &options.source,
        RunOptions {
            dry_run: options.dry_run,
            consolidate: options.consolidate,
            show_progress: std::io::stderr().is_terminal(),
        },
    )?;

    Ok(())
}
