use std::fmt;
use std::path::{Path, PathBuf};

// @module: Subtitle extension table and format detection

/// Parsing rule selected for a subtitle file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleFormat {
    /// SubRip
    Srt,
    /// WebVTT
    Vtt,
    /// Advanced SubStation Alpha / SubStation Alpha
    AssSsa,
    /// Anything else, handled by the generic text rule
    Unknown,
}

// @struct: One row of the extension table
#[derive(Debug, Clone, Copy)]
pub struct ExtensionInfo {
    // @field: Lowercase extension without the leading dot
    pub extension: &'static str,
    // @field: Parsing rule used for this extension
    pub format: SubtitleFormat,
}

/// Every extension the locator picks up. Only the first four are parsed with a
/// dedicated rule; the rest are copied and fall back to the generic rule.
pub static SUBTITLE_EXTENSIONS: &[ExtensionInfo] = &[
    ExtensionInfo { extension: "srt", format: SubtitleFormat::Srt },
    ExtensionInfo { extension: "vtt", format: SubtitleFormat::Vtt },
    ExtensionInfo { extension: "ass", format: SubtitleFormat::AssSsa },
    ExtensionInfo { extension: "ssa", format: SubtitleFormat::AssSsa },
    ExtensionInfo { extension: "sub", format: SubtitleFormat::Unknown },
    ExtensionInfo { extension: "sbv", format: SubtitleFormat::Unknown },
    ExtensionInfo { extension: "ttml", format: SubtitleFormat::Unknown },
    ExtensionInfo { extension: "scc", format: SubtitleFormat::Unknown },
    ExtensionInfo { extension: "stl", format: SubtitleFormat::Unknown },
    ExtensionInfo { extension: "sup", format: SubtitleFormat::Unknown },
    ExtensionInfo { extension: "idx", format: SubtitleFormat::Unknown },
    ExtensionInfo { extension: "usf", format: SubtitleFormat::Unknown },
];

/// Look up an extension (with or without the leading dot, any case)
pub fn lookup_extension(extension: &str) -> Option<&'static ExtensionInfo> {
    let normalized = extension.trim_start_matches('.');
    SUBTITLE_EXTENSIONS
        .iter()
        .find(|info| info.extension.eq_ignore_ascii_case(normalized))
}

/// Whether the path carries one of the known subtitle extensions
pub fn is_subtitle_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| lookup_extension(&ext.to_string_lossy()))
        .is_some()
}

impl SubtitleFormat {
    /// Pick the parsing rule for a path.
    ///
    /// A known subtitle extension always wins. Without one, the file name is
    /// searched for a format marker token, which is what keeps extracted files
    /// (`01_Intro_01_Welcome_srt`) parseable after their dots became underscores.
    pub fn detect<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if let Some(info) = path
            .extension()
            .and_then(|ext| lookup_extension(&ext.to_string_lossy()))
        {
            return info.format;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Self::from_name_markers(&name)
    }

    // The marker nearest the end wins: an extracted name ends in `_<ext>` or
    // `_<ext>_<n>`, while earlier tokens come from folder and lesson titles.
    fn from_name_markers(name: &str) -> Self {
        name.split(|c: char| c == '_' || c == '.' || c == '-' || c == ' ')
            .rev()
            .find_map(|token| match token {
                "srt" => Some(Self::Srt),
                "vtt" => Some(Self::Vtt),
                "ass" | "ssa" => Some(Self::AssSsa),
                _ => None,
            })
            .unwrap_or(Self::Unknown)
    }

    /// Short tag used in logs
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::AssSsa => "ass_ssa",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A discovered subtitle file together with its parsing rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleFile {
    path: PathBuf,
    format: SubtitleFormat,
}

impl SubtitleFile {
    /// Wrap a path, detecting its format once
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let format = SubtitleFormat::detect(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SubtitleFormat {
        self.format
    }

    /// File name for messages and error markers
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}
