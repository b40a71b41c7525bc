use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

// @module: Chapter/lesson structure inferred from file names

/// Chapter or lesson number used when a file name carries none
pub const MISSING_NUMBER: u64 = 999;

static FIRST_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());

// @const: Digit run enclosed by underscores
static LESSON_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(\d+)_").unwrap());

// @const: Leading "03. ", "7_", "12 - " style numbering
static NUMBER_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+\s*[._-]*\s*)").unwrap());

const UNKNOWN_CHAPTER: &str = "Unknown Chapter";
const UNKNOWN_LESSON: &str = "Unknown Lesson";
const GENERAL_CHAPTER: &str = "General";
const GENERIC_LESSON: &str = "Lesson";

/// Sort key recovered from a file name.
///
/// Field order matters: the derived `Ord` compares chapter, then lesson, then
/// the file name, which gives a total and reproducible order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StructuralKey {
    pub chapter: u64,
    pub lesson: u64,
    pub file_name: String,
}

/// Heading labels for the formatted transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureLabels {
    pub chapter: String,
    pub lesson: String,
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

// Digit runs beyond u64 still sort after every smaller number.
fn parse_number(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

fn starts_with_digit(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn strip_number_prefix(label: &str) -> String {
    NUMBER_PREFIX_REGEX.replace(label, "").trim().to_string()
}

/// Derive the ordering key for a path from its file name
pub fn sort_key<P: AsRef<Path>>(path: P) -> StructuralKey {
    let file_name = file_name_of(path.as_ref());

    let chapter = FIRST_NUMBER_REGEX
        .captures(&file_name)
        .map(|caps| parse_number(&caps[1]))
        .unwrap_or(MISSING_NUMBER);

    let lesson = LESSON_NUMBER_REGEX
        .captures(&file_name)
        .map(|caps| parse_number(&caps[1]))
        .unwrap_or(MISSING_NUMBER);

    StructuralKey { chapter, lesson, file_name }
}

/// Derive chapter and lesson headings from the file stem.
///
/// Chapter tokens run from the first digit-leading token up to the next
/// digit-leading token; the lesson is that next token and everything after it.
pub fn labels<P: AsRef<Path>>(path: P) -> StructureLabels {
    let stem = stem_of(path.as_ref());
    let tokens: Vec<&str> = stem.split('_').collect();

    let mut chapter = UNKNOWN_CHAPTER.to_string();
    let mut lesson = UNKNOWN_LESSON.to_string();

    if let Some(start) = tokens.iter().position(|t| starts_with_digit(t)) {
        let lesson_start = tokens[start + 1..]
            .iter()
            .position(|t| starts_with_digit(t))
            .map(|offset| start + 1 + offset);

        let chapter_end = lesson_start.unwrap_or(tokens.len());
        chapter = tokens[start..chapter_end].join(" ");

        if let Some(lesson_start) = lesson_start {
            lesson = tokens[lesson_start..].join(" ");
        }
    }

    let chapter = strip_number_prefix(&chapter);
    let lesson = strip_number_prefix(&lesson);

    StructureLabels {
        chapter: if chapter.is_empty() { GENERAL_CHAPTER.to_string() } else { chapter },
        lesson: if lesson.is_empty() { GENERIC_LESSON.to_string() } else { lesson },
    }
}

/// Order paths by [`sort_key`]
pub fn sort_by_course_structure<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut keyed: Vec<(StructuralKey, PathBuf)> = paths
        .iter()
        .map(|p| (sort_key(p), p.as_ref().to_path_buf()))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, path)| path).collect()
}

/// Title for the separator lines of the raw document
pub fn lesson_title<P: AsRef<Path>>(path: P) -> String {
    let title = stem_of(path.as_ref())
        .replace("_vtt", "")
        .replace("_srt", "")
        .replace("_ass", "")
        .replace('_', " ")
        .replace("  ", " ");

    let title = strip_number_prefix(&title);
    if title.is_empty() {
        UNKNOWN_LESSON.to_string()
    } else {
        title
    }
}

/// Course title from a directory name, `_` and `-` read as spaces
pub fn course_name<P: AsRef<Path>>(path: P) -> String {
    let name = file_name_of(path.as_ref()).replace(['_', '-'], " ");
    if name.is_empty() {
        "Course".to_string()
    } else {
        name
    }
}
