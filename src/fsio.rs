//! Filesystem access for the edit applicator
//!
//! Writes go through a temp-file-then-rename so a target file is never
//! observed half-written, and parent directories are created on demand so
//! the model can introduce files in new subdirectories.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// What the applicator needs from the filesystem.
pub trait FileIo {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<String>;
    /// Write full content, creating parent directories as needed. The write
    /// is atomic from the caller's perspective: full old-or-new content.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskIo;

impl FileIo for DiskIo {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        write_atomic(path, content)
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid target path {}", path.display()))?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("Failed to write {}", path.display()));
    }
    Ok(())
}
