use anyhow::{Result, Context};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::consolidator::{Consolidator, MarkdownConsolidator, RawConsolidator};
use crate::errors::AppError;
use crate::extractor::Extractor;
use crate::file_utils::FileManager;

// @module: Application controller for subtitle extraction and consolidation

/// Switches for a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// List discovered files without copying anything
    pub dry_run: bool,
    /// Write the Markdown transcript and raw concatenation after extraction
    pub consolidate: bool,
    /// Draw a progress bar while copying
    pub show_progress: bool,
}

/// What a run found and produced
#[derive(Debug, Default)]
pub struct RunSummary {
    pub discovered: Vec<PathBuf>,
    pub extracted: Vec<PathBuf>,
    pub formatted_document: Option<PathBuf>,
    pub raw_document: Option<PathBuf>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locate subtitle files under `source_dir`
    pub fn discover(&self, source_dir: &Path) -> Result<Vec<PathBuf>> {
        if !FileManager::dir_exists(source_dir) {
            return Err(AppError::MissingSource(source_dir.display().to_string()).into());
        }
        FileManager::find_subtitle_files(source_dir, self.config.follow_links)
    }

    /// Run the whole workflow: locate, extract, and optionally consolidate.
    ///
    /// Only a missing source directory or failing to write into the output
    /// directory is an error; an empty source is reported and leaves the
    /// output untouched.
    pub fn run(&self, source_dir: &Path, options: RunOptions) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        info!("Searching for subtitle files in: {:?}", source_dir);
        let discovered = self.discover(source_dir)?;

        if discovered.is_empty() {
            warn!("No subtitle files found");
            return Ok(RunSummary::default());
        }

        info!("Found {} subtitle files:", discovered.len());
        for file in &discovered {
            info!("  {:?}", file);
        }

        if options.dry_run {
            info!("--dry-run mode: no files were copied");
            return Ok(RunSummary {
                discovered,
                ..RunSummary::default()
            });
        }

        info!("Extracting to: {:?}", self.config.output_dir);
        let extractor = Extractor::new(&self.config.output_dir).with_progress(options.show_progress);
        let extracted = extractor.extract(&discovered)?;
        info!("Successfully extracted {} files", extracted.len());

        let mut summary = RunSummary {
            discovered,
            extracted,
            ..RunSummary::default()
        };

        if options.consolidate && !summary.extracted.is_empty() {
            let (formatted, raw) = self.consolidate(source_dir, &summary.extracted)?;
            summary.formatted_document = Some(formatted);
            summary.raw_document = Some(raw);
        }

        info!("Finished in {}", Self::format_duration(start_time.elapsed()));
        Ok(summary)
    }

    /// Write both consolidated documents for already extracted files
    pub fn consolidate(&self, source_dir: &Path, extracted: &[PathBuf]) -> Result<(PathBuf, PathBuf)> {
        // "." and ".." have no name of their own to title the course with.
        let source_dir = source_dir.canonicalize().unwrap_or_else(|_| source_dir.to_path_buf());
        let formatted = MarkdownConsolidator::for_source(&source_dir)
            .write_to(extracted, self.config.formatted_path())
            .context("Failed to write formatted transcript")?;
        info!("Formatted transcript: {:?}", formatted);

        let raw = RawConsolidator::new()
            .write_to(extracted, self.config.raw_path())
            .context("Failed to write raw transcript")?;
        info!("Raw transcript: {:?}", raw);

        Ok((formatted, raw))
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
