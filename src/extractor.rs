use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::{Component, Path, PathBuf};

use crate::file_utils::FileManager;

// @module: Copy discovered subtitles into one flat directory

/// Build the flat destination name for a discovered file.
///
/// Keeps the path segments from the first one that looks like course
/// structure (contains a digit or "chapter") onwards, otherwise the last two
/// segments, and joins them with underscores. Spaces and dots become
/// underscores too, so `01 Intro/02.Setup.srt` turns into `01_Intro_02_Setup_srt`.
pub fn safe_file_name<P: AsRef<Path>>(path: P) -> String {
    let parts: Vec<String> = path
        .as_ref()
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    let structural_start = parts.iter().position(|part| {
        part.chars().any(|c| c.is_ascii_digit()) || part.to_lowercase().contains("chapter")
    });

    let course_parts = match structural_start {
        Some(start) => &parts[start..],
        None => &parts[parts.len().saturating_sub(2)..],
    };

    course_parts.join("_").replace([' ', '.'], "_")
}

/// First free path for `file_name` inside `dir`, appending `_1`, `_2`, … before
/// the extension while the name is taken
pub fn unique_destination<P: AsRef<Path>>(dir: P, file_name: &str) -> PathBuf {
    let dir = dir.as_ref();
    let original = dir.join(file_name);
    if !original.exists() {
        return original;
    }

    let stem = original
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let suffix = original
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let candidate = dir.join(format!("{}_{}{}", stem, counter, suffix));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Copies subtitle files into a flat output directory
pub struct Extractor {
    // @field: Destination directory
    output_dir: PathBuf,
    // @field: Draw a progress bar while copying
    show_progress: bool,
}

impl Extractor {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            show_progress: false,
        }
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Copy every file and return the destination paths in input order.
    ///
    /// A file that fails to copy is logged and left out; only failing to
    /// create the output directory aborts the batch.
    pub fn extract(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        FileManager::ensure_dir(&self.output_dir)?;

        let progress_bar = if self.show_progress {
            let pb = ProgressBar::new(files.len() as u64);
            let template_result = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
                .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(template_result.progress_chars("█▓▒░"));
            pb.set_message("Extracting");
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut extracted = Vec::with_capacity(files.len());

        for file in files {
            let destination = unique_destination(&self.output_dir, &safe_file_name(file));

            match FileManager::copy_file(file, &destination) {
                Ok(()) => {
                    progress_bar.suspend(|| info!("Extracted: {:?} -> {:?}", file, destination));
                    extracted.push(destination);
                }
                Err(e) => {
                    progress_bar.suspend(|| error!("Failed to extract {:?}: {:#}", file, e));
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        Ok(extracted)
    }
}
