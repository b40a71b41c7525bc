use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Application configuration module
/// This module handles loading and validating configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory extracted subtitles are copied into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the Markdown transcript, written inside `output_dir`
    #[serde(default = "default_formatted_file_name")]
    pub formatted_file_name: String,

    /// File name of the raw concatenation, written inside `output_dir`
    #[serde(default = "default_raw_file_name")]
    pub raw_file_name: String,

    /// Follow symbolic links while walking the source tree
    #[serde(default)]
    pub follow_links: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("extracted_subtitles")
}

fn default_formatted_file_name() -> String {
    "formatted.md".to_string()
}

fn default_raw_file_name() -> String {
    "raw.txt".to_string()
}

fn validate_file_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Config(format!("{} must not be empty", field)).into());
    }
    if value.contains('/') || value.contains('\\') {
        return Err(AppError::Config(format!("{} must be a plain file name, got '{}'", field, value)).into());
    }
    Ok(())
}

impl Config {
    /// Load configuration from a JSON file, or fall back to defaults when the
    /// file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(AppError::Config("output_dir must not be empty".to_string()).into());
        }

        validate_file_name("formatted_file_name", &self.formatted_file_name)?;
        validate_file_name("raw_file_name", &self.raw_file_name)?;

        if self.formatted_file_name == self.raw_file_name {
            return Err(AppError::Config(format!(
                "formatted_file_name and raw_file_name must differ, both are '{}'",
                self.raw_file_name
            ))
            .into());
        }

        Ok(())
    }

    /// Where the Markdown transcript is written
    pub fn formatted_path(&self) -> PathBuf {
        self.output_dir.join(&self.formatted_file_name)
    }

    /// Where the raw concatenation is written
    pub fn raw_path(&self) -> PathBuf {
        self.output_dir.join(&self.raw_file_name)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: default_output_dir(),
            formatted_file_name: default_formatted_file_name(),
            raw_file_name: default_raw_file_name(),
            follow_links: false,
            log_level: LogLevel::default(),
        }
    }
}
