/*!
 * Common test utilities for the subcollate test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

/// Route library logs through the test harness; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    init_logging();
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent folders as needed
pub fn create_test_file(dir: &Path, relative_path: &str, content: &str) -> Result<PathBuf> {
    create_test_bytes(dir, relative_path, content.as_bytes())
}

/// Creates a test file with raw bytes
pub fn create_test_bytes(dir: &Path, relative_path: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(relative_path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample SubRip content
pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
Welcome to the course.

2
00:00:05,000 --> 00:00:09,000
Let's get started.
";

/// Sample WebVTT content
pub const SAMPLE_VTT: &str = "WEBVTT

NOTE setup lesson

1
00:00:01.000 --> 00:00:03.000 align:start
Install the toolchain first.

00:03.500 --> 00:06.000
Then open a terminal.
";

/// Sample Advanced SubStation Alpha content
pub const SAMPLE_ASS: &str = "[Script Info]
Title: Sample

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\\an8}Styled, with commas
Dialogue: 0,0:00:03.00,0:00:04.00,Default,,0,0,0,,Plain line
";

/// Builds the canonical two-lesson course used by the workflow tests:
/// `<root>/Rust_Course/01_Introduction/{01_Welcome.srt, 02_Setup.vtt}`
pub fn create_sample_course(root: &Path) -> Result<PathBuf> {
    let course = root.join("Rust_Course");
    create_test_file(&course, "01_Introduction/01_Welcome.srt", SAMPLE_SRT)?;
    create_test_file(&course, "01_Introduction/02_Setup.vtt", SAMPLE_VTT)?;
    Ok(course)
}
