/*!
 * # subcollate
 *
 * A Rust library for gathering course subtitles scattered across nested
 * folders into one place, and turning them into readable transcripts.
 *
 * ## Features
 *
 * - Recursively locate subtitle files by extension
 * - Copy them into a flat directory with collision-safe names
 * - Extract spoken text from:
 *   - SubRip (`.srt`)
 *   - WebVTT (`.vtt`)
 *   - Advanced SubStation Alpha / SubStation Alpha (`.ass`, `.ssa`)
 *   - anything else, through a generic line filter
 * - Infer chapter and lesson structure from file names
 * - Write a Markdown transcript and a raw concatenation in course order
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_format`: Extension table and format detection
 * - `text_decoding`: Encoding fallback when reading subtitle bytes
 * - `subtitle_parser`: Per-format text extraction
 * - `course_structure`: Chapter/lesson inference and sort keys
 * - `file_utils`: File system operations
 * - `extractor`: Flat copy with unique names
 * - `consolidator`: Markdown and raw document renderers
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod consolidator;
pub mod course_structure;
pub mod errors;
pub mod extractor;
pub mod file_utils;
pub mod subtitle_format;
pub mod subtitle_parser;
pub mod text_decoding;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOptions, RunSummary};
pub use consolidator::{Consolidator, MarkdownConsolidator, RawConsolidator};
pub use course_structure::{StructuralKey, StructureLabels};
pub use errors::{AppError, SubtitleError};
pub use subtitle_format::{SubtitleFile, SubtitleFormat};
