/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use subcollate::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that ensure_dir creates nested directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;

    assert!(nested.is_dir());
    Ok(())
}

/// Test that the locator walks nested folders and matches extensions case-insensitively
#[test]
fn test_find_subtitle_files_withNestedTree_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "02_Chapter/01_b.VTT", "x")?;
    common::create_test_file(root, "01_Chapter/deep/01_a.srt", "x")?;
    common::create_test_file(root, "01_Chapter/notes.txt", "x")?;
    common::create_test_file(root, "01_Chapter/video.mp4", "x")?;
    common::create_test_file(root, "extras/track.sup", "x")?;

    let found = FileManager::find_subtitle_files(root, false)?;
    let relative: Vec<String> = found
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(relative, vec!["01_Chapter/deep/01_a.srt", "02_Chapter/01_b.VTT", "extras/track.sup"]);
    Ok(())
}

/// Test that an empty tree yields no files
#[test]
fn test_find_subtitle_files_withEmptyDir_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.md", "no subtitles here")?;

    assert!(FileManager::find_subtitle_files(temp_dir.path(), false)?.is_empty());
    Ok(())
}

/// Test that a missing directory is an error
#[test]
fn test_find_subtitle_files_withMissingDir_shouldFail() {
    assert!(FileManager::find_subtitle_files("./non_existent_directory_12345", false).is_err());
}

/// Test that lossy reads replace invalid UTF-8 instead of failing
#[test]
fn test_read_lossy_withInvalidUtf8_shouldReplaceBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_bytes(temp_dir.path(), "latin.srt", b"Caf\xe9")?;

    let content = FileManager::read_lossy(&path)?;

    assert_eq!(content, "Caf\u{FFFD}");
    Ok(())
}

/// Test that copy_file creates the target directory
#[test]
fn test_copy_file_withMissingTargetDir_shouldCreateItAndCopy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "source.srt", "1\n")?;
    let target = temp_dir.path().join("out").join("copy.srt");

    FileManager::copy_file(&source, &target)?;

    assert_eq!(std::fs::read_to_string(&target)?, "1\n");
    Ok(())
}
