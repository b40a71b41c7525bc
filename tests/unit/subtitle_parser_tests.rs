/*!
 * Tests for subtitle text extraction
 */

use anyhow::Result;
use subcollate::errors::SubtitleError;
use subcollate::subtitle_format::{SubtitleFile, SubtitleFormat};
use subcollate::subtitle_parser;
use crate::common;

/// Test that no sequence number or timing line survives SRT parsing
#[test]
fn test_parse_srt_withSampleFile_shouldRemoveIndicesAndTimings() {
    let text = subtitle_parser::parse_srt(common::SAMPLE_SRT);

    assert_eq!(text, "Welcome to the course. Let's get started.");
    assert!(!text.contains("-->"));
}

/// Test that speech order is preserved across many cues
#[test]
fn test_parse_srt_withManyCues_shouldPreserveOrder() {
    let content: String = (1..=20)
        .map(|i| format!("{}\n00:00:{:02},000 --> 00:00:{:02},500\nword{}\n\n", i, i, i, i))
        .collect();

    let text = subtitle_parser::parse_srt(&content);
    let expected: Vec<String> = (1..=20).map(|i| format!("word{}", i)).collect();

    assert_eq!(text, expected.join(" "));
}

/// Test that VTT header, notes and cue settings are dropped
#[test]
fn test_parse_vtt_withSampleFile_shouldKeepOnlySpeech() {
    let text = subtitle_parser::parse_vtt(common::SAMPLE_VTT);

    assert_eq!(text, "Install the toolchain first. Then open a terminal.");
    assert!(!text.contains("WEBVTT"));
    assert!(!text.contains("NOTE"));
    assert!(!text.contains("align:"));
}

/// Test that a REGION definition line is dropped while the cue text stays
#[test]
fn test_parse_vtt_withRegionBlock_shouldDropRegionLine() {
    let content = "WEBVTT\n\nREGION\n\n00:00.000 --> 00:02.000\nFirst words\n";

    assert_eq!(subtitle_parser::parse_vtt(content), "First words");
}

/// Test that standalone vertical and size cue settings are dropped
#[test]
fn test_parse_vtt_withVerticalAndSizeSettings_shouldDropSettingLines() {
    let content = "WEBVTT\n\n00:00.000 --> 00:02.000\nvertical:rl\nsize:50%\nSideways caption\n";

    let text = subtitle_parser::parse_vtt(content);

    assert_eq!(text, "Sideways caption");
    assert!(!text.contains("vertical"));
    assert!(!text.contains("size"));
}

/// Test that an extracted VTT file whose folder mentions srt is still parsed as VTT
#[test]
fn test_parse_file_withCompetingNameMarkers_shouldUseTrailingMarker() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "01_srt_vs_vtt_02_Intro_vtt", common::SAMPLE_VTT)?;

    let file = SubtitleFile::new(&path);
    assert_eq!(file.format(), SubtitleFormat::Vtt);
    assert_eq!(subtitle_parser::parse_file(&file)?, "Install the toolchain first. Then open a terminal.");

    Ok(())
}

/// Test that UTF-16 files without a byte order mark are read as text
#[test]
fn test_parse_file_withBomlessUtf16_shouldDecode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let bytes: Vec<u8> = common::SAMPLE_SRT.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect();
    let path = common::create_test_bytes(temp_dir.path(), "01_wide.srt", &bytes)?;

    let text = subtitle_parser::parse_file(&SubtitleFile::new(&path))?;

    assert_eq!(text, "Welcome to the course. Let's get started.");
    Ok(())
}

/// Test that ASS dialogue text keeps commas and loses override tags
#[test]
fn test_parse_ass_withSampleFile_shouldExtractDialogue() {
    assert_eq!(subtitle_parser::parse_ass(common::SAMPLE_ASS), "Styled, with commas Plain line");
}

/// Test that parse_file picks the rule from an extracted file name
#[test]
fn test_parse_file_withExtractedName_shouldDetectFormatFromName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "01_Intro_03_Styles_ass", common::SAMPLE_ASS)?;

    let file = SubtitleFile::new(&path);
    assert_eq!(file.format(), SubtitleFormat::AssSsa);
    assert_eq!(subtitle_parser::parse_file(&file)?, "Styled, with commas Plain line");

    Ok(())
}

/// Test that Latin-1 encoded files decode through the fallback list
#[test]
fn test_parse_file_withLatin1Bytes_shouldDecode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_bytes(
        temp_dir.path(),
        "01_accents.srt",
        b"1\r\n00:00:01,000 --> 00:00:02,000\r\nD\xe9j\xe0 vu\r\n",
    )?;

    let text = subtitle_parser::parse_file(&SubtitleFile::new(&path))?;

    assert_eq!(text, "Déjà vu");
    Ok(())
}

/// Test that a missing file reports a read error with its name
#[test]
fn test_parse_file_withMissingFile_shouldReturnReadError() {
    let file = SubtitleFile::new("/definitely/not/here/01_gone.srt");

    let err = subtitle_parser::parse_file(&file).unwrap_err();

    assert!(matches!(err, SubtitleError::Read { .. }));
    assert_eq!(err.file_name(), "01_gone.srt");
    assert!(err.marker().starts_with("[Error reading 01_gone.srt:"));
}

/// Test that unparsed formats go through the generic rule
#[test]
fn test_parse_withUnknownFormat_shouldUseGenericRule() {
    let content = "0:00:01.000,0:00:03.000\nHello from YouTube\n\n0:00:03.000,0:00:05.000\nSecond caption\n";

    let text = subtitle_parser::parse(content, SubtitleFormat::detect("captions.sbv"));

    assert_eq!(text, "0:00:01.000,0:00:03.000 Hello from YouTube 0:00:03.000,0:00:05.000 Second caption");
}
