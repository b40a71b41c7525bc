/*!
 * Error types for the subcollate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while turning a single subtitle file into text.
///
/// These never abort a batch: the consolidators render them in place of the
/// file's content with [`SubtitleError::marker`] and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// None of the supported encodings could decode the file
    #[error("Could not decode {name}")]
    Decode {
        /// File name
        name: String,
    },

    /// The file was decoded but could not be parsed
    #[error("Failed to parse {name}: {detail}")]
    Parse {
        /// File name
        name: String,
        /// Underlying reason
        detail: String,
    },

    /// The file could not be read from disk
    #[error("Failed to read {name}: {detail}")]
    Read {
        /// File name
        name: String,
        /// Underlying I/O error
        detail: String,
    },
}

impl SubtitleError {
    /// Name of the file the error refers to
    pub fn file_name(&self) -> &str {
        match self {
            Self::Decode { name } | Self::Parse { name, .. } | Self::Read { name, .. } => name,
        }
    }

    /// Inline placeholder written into consolidated documents instead of the
    /// file's text.
    pub fn marker(&self) -> String {
        match self {
            Self::Decode { name } => format!("[Error: Could not decode {}]", name),
            Self::Parse { name, detail } => format!("[Error parsing {}: {}]", name, detail),
            Self::Read { name, detail } => format!("[Error reading {}: {}]", name, detail),
        }
    }
}

/// Errors that stop a run before any file is processed
#[derive(Error, Debug)]
pub enum AppError {
    /// The source directory given on the command line does not exist
    #[error("Source directory does not exist: {0}")]
    MissingSource(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
