use anyhow::{Result, Context};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::subtitle_format;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Recursively find every file with a known subtitle extension, sorted by path.
    ///
    /// Entries that cannot be read (permissions, broken links) are logged and
    /// skipped so one bad folder does not hide the rest of the tree.
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P, follow_links: bool) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(anyhow::anyhow!("Directory does not exist: {:?}", dir));
        }

        let mut result = Vec::new();

        for entry in WalkDir::new(dir).follow_links(follow_links) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && subtitle_format::is_subtitle_path(entry.path()) {
                result.push(entry.path().to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file as raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file as text, replacing invalid UTF-8 sequences instead of failing
    pub fn read_lossy<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = Self::read_bytes(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Copy a file from one location to another, ensuring the target directory exists
    pub fn copy_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<()> {
        let from = from.as_ref();
        let to = to.as_ref();

        if !from.exists() {
            return Err(anyhow::anyhow!("Source file does not exist: {:?}", from));
        }

        // Ensure the target directory exists
        if let Some(parent) = to.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::copy(from, to)
            .with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;

        Ok(())
    }
}
