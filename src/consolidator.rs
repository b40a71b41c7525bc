/*!
 * Consolidated documents built from extracted subtitle files.
 *
 * Both renderers order their input with the course structure sort key, so the
 * same set of files always yields the same document:
 * - `MarkdownConsolidator`: cleaned transcript with chapter/lesson headings
 * - `RawConsolidator`: original files, timing markup included, one after another
 */

use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::course_structure;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::subtitle_format::SubtitleFile;
use crate::subtitle_parser;

/// A renderer that merges many subtitle files into one document
pub trait Consolidator {
    /// Render the document for `files`, in course order
    fn render(&self, files: &[PathBuf]) -> String;

    /// Render and write the document to `output_path`
    fn write_to<P: AsRef<Path>>(&self, files: &[PathBuf], output_path: P) -> Result<PathBuf> {
        let output_path = output_path.as_ref();
        let document = self.render(files);
        FileManager::write_to_file(output_path, &document)?;
        Ok(output_path.to_path_buf())
    }
}

/// Markdown transcript: `#` course, `##` chapter on change, `###` lesson
#[derive(Debug, Clone, Default)]
pub struct MarkdownConsolidator {
    course_name: Option<String>,
}

impl MarkdownConsolidator {
    /// Title the document after the source directory
    pub fn for_source<P: AsRef<Path>>(source_dir: P) -> Self {
        Self {
            course_name: Some(course_structure::course_name(source_dir)),
        }
    }

    /// Without a source directory the title comes from the first file in order
    pub fn new() -> Self {
        Self::default()
    }
}

impl Consolidator for MarkdownConsolidator {
    fn render(&self, files: &[PathBuf]) -> String {
        let sorted = course_structure::sort_by_course_structure(files);

        let course_name = match (&self.course_name, sorted.first()) {
            (Some(name), _) => name.clone(),
            (None, Some(first)) => course_structure::course_name(first),
            (None, None) => "Course".to_string(),
        };

        let mut parts: Vec<String> = vec![format!("# {}\n", course_name)];
        let mut current_chapter: Option<String> = None;

        for path in &sorted {
            let labels = course_structure::labels(path);

            if current_chapter.as_deref() != Some(labels.chapter.as_str()) {
                parts.push(format!("\n## {}\n", labels.chapter));
                current_chapter = Some(labels.chapter.clone());
            }
            parts.push(format!("\n### {}\n", labels.lesson));

            let file = SubtitleFile::new(path);
            debug!("Parsing {:?} as {}", path, file.format());
            match subtitle_parser::parse_file(&file) {
                Ok(text) => {
                    if !text.trim().is_empty() {
                        parts.push(format!("{}\n", text));
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    parts.push(format!("{}\n", e.marker()));
                }
            }
        }

        parts.join("\n")
    }
}

/// Plain concatenation of the original files under `=== <lesson> ===` separators
#[derive(Debug, Clone, Copy, Default)]
pub struct RawConsolidator;

impl RawConsolidator {
    pub fn new() -> Self {
        Self
    }

    fn read_original(path: &Path) -> Result<String, SubtitleError> {
        FileManager::read_lossy(path).map_err(|e| SubtitleError::Read {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            detail: e.root_cause().to_string(),
        })
    }
}

impl Consolidator for RawConsolidator {
    fn render(&self, files: &[PathBuf]) -> String {
        let sorted = course_structure::sort_by_course_structure(files);
        let mut parts: Vec<String> = Vec::with_capacity(sorted.len() * 2);

        for path in &sorted {
            parts.push(format!("=== {} ===\n", course_structure::lesson_title(path)));

            match Self::read_original(path) {
                Ok(content) if content.trim().is_empty() => {}
                Ok(content) => {
                    if content.ends_with('\n') {
                        parts.push(content);
                    } else {
                        parts.push(format!("{}\n", content));
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    parts.push(format!("{}\n", e.marker()));
                }
            }
        }

        parts.join("\n")
    }
}
