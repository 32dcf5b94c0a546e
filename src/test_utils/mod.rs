//! Test utilities for artifact-uploader
//!
//! Shared fixtures for the unit tests in this crate.

#![cfg(test)]

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates a temporary directory that is automatically cleaned up
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file structure in a temporary directory
///
/// ```text
/// file1.txt
/// file2.log
/// dir1/file3.txt
/// dir1/subdir1/file4.txt
/// dir2/file5.log
/// ```
pub fn create_test_file_structure() -> Result<TempDir> {
    let temp_dir = create_temp_dir()?;
    let base_path = temp_dir.path();

    fs::create_dir_all(base_path.join("dir1/subdir1"))?;
    fs::create_dir_all(base_path.join("dir2"))?;

    fs::write(base_path.join("file1.txt"), b"Test content 1")?;
    fs::write(base_path.join("file2.log"), b"Test log content")?;
    fs::write(base_path.join("dir1/file3.txt"), b"Test content 3")?;
    fs::write(base_path.join("dir1/subdir1/file4.txt"), b"Test content 4")?;
    fs::write(base_path.join("dir2/file5.log"), b"Another log file")?;

    Ok(temp_dir)
}

/// Creates a workspace holding `build/out/a.txt` and `build/out/sub/b.txt`
pub fn create_build_output() -> Result<TempDir> {
    let temp_dir = create_temp_dir()?;
    write_file(&temp_dir.path().join("build/out/a.txt"), b"artifact a")?;
    write_file(&temp_dir.path().join("build/out/sub/b.txt"), b"artifact b")?;
    Ok(temp_dir)
}

/// Writes a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
