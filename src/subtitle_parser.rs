use std::fs;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::subtitle_format::{SubtitleFile, SubtitleFormat};
use crate::text_decoding;

// @module: Subtitle content to plain text

// @const: SRT style time range, 1-2 digit hours, comma or period before millis
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}:\d{2}:\d{2}[,.]\d{3}\s*-->\s*\d{1,2}:\d{2}:\d{2}[,.]\d{3}").unwrap()
});

// @const: WebVTT short time range without hours
static SHORT_TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}:\d{2}\.\d{3}\s*-->\s*\d{1,2}:\d{2}\.\d{3}").unwrap()
});

// @const: WebVTT cue setting line
static CUE_SETTING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:align|line|position|size|vertical):").unwrap()
});

// @const: ASS/SSA override block
static OVERRIDE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").unwrap());

const VTT_KEYWORDS: [&str; 4] = ["WEBVTT", "NOTE", "STYLE", "REGION"];

// Dialogue: Layer,Start,End,Style,Name,MarginL,MarginR,MarginV,Effect,Text
const ASS_DIALOGUE_FIELDS: usize = 10;

fn is_sequence_number(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

fn is_time_range(line: &str) -> bool {
    TIME_RANGE_REGEX.is_match(line)
}

fn trimmed_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split('\n').map(str::trim)
}

/// Reduce subtitle text to its spoken words using the rule for `format`
pub fn parse(content: &str, format: SubtitleFormat) -> String {
    match format {
        SubtitleFormat::Srt => parse_srt(content),
        SubtitleFormat::Vtt => parse_vtt(content),
        SubtitleFormat::AssSsa => parse_ass(content),
        SubtitleFormat::Unknown => parse_generic(content),
    }
}

/// SubRip: drop sequence numbers and timing lines, join each cue's lines
pub fn parse_srt(content: &str) -> String {
    let lines: Vec<&str> = trimmed_lines(content).collect();
    let mut cues: Vec<String> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.is_empty() || is_sequence_number(line) || is_time_range(line) {
            i += 1;
            continue;
        }

        let mut cue = vec![line];
        i += 1;
        while i < lines.len() {
            let next = lines[i];
            if next.is_empty() || is_sequence_number(next) || is_time_range(next) {
                break;
            }
            cue.push(next);
            i += 1;
        }
        cues.push(cue.join(" "));
    }

    cues.join(" ")
}

/// WebVTT: every line is classified on its own; header, NOTE, STYLE and
/// REGION keyword lines, timings, cue settings, tags and identifiers are dropped
pub fn parse_vtt(content: &str) -> String {
    trimmed_lines(content)
        .filter(|line| {
            !line.is_empty()
                && !VTT_KEYWORDS.iter().any(|keyword| line.starts_with(keyword))
                && !SHORT_TIME_RANGE_REGEX.is_match(line)
                && !is_time_range(line)
                && !CUE_SETTING_REGEX.is_match(line)
                && !line.starts_with('<')
                && !is_sequence_number(line)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// ASS/SSA: text field of every well-formed `Dialogue:` line, override tags removed
pub fn parse_ass(content: &str) -> String {
    trimmed_lines(content)
        .filter(|line| line.starts_with("Dialogue:"))
        .filter_map(|line| {
            let fields: Vec<&str> = line.splitn(ASS_DIALOGUE_FIELDS, ',').collect();
            if fields.len() < ASS_DIALOGUE_FIELDS {
                debug!("Dropping malformed dialogue line: {}", line);
                return None;
            }
            let text = OVERRIDE_TAG_REGEX.replace_all(fields[ASS_DIALOGUE_FIELDS - 1], "");
            Some(text.trim().to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fallback for formats without a dedicated rule
pub fn parse_generic(content: &str) -> String {
    trimmed_lines(content)
        .filter(|line| !line.is_empty() && !line.contains("-->") && !is_sequence_number(line))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode raw file bytes and parse them.
///
/// `name` only labels the error when decoding fails or the bytes turn out to
/// be binary caption data.
pub fn parse_bytes(bytes: &[u8], format: SubtitleFormat, name: &str) -> Result<String, SubtitleError> {
    let (content, encoding) = text_decoding::decode_text(bytes).ok_or_else(|| SubtitleError::Decode {
        name: name.to_string(),
    })?;
    debug!("Decoded {} as {}", name, encoding);

    if content.contains('\0') {
        return Err(SubtitleError::Parse {
            name: name.to_string(),
            detail: "binary caption data has no text to extract".to_string(),
        });
    }

    Ok(parse(&content, format))
}

/// Read a subtitle file from disk and return its plain text
pub fn parse_file(file: &SubtitleFile) -> Result<String, SubtitleError> {
    let bytes = fs::read(file.path()).map_err(|e| SubtitleError::Read {
        name: file.name(),
        detail: e.to_string(),
    })?;
    parse_bytes(&bytes, file.format(), &file.name())
}
