//! Module `validation`
//!
//! Local filesystem preflight checks, run before any command goes out on
//! the control channel.

use std::path::Path;

use crate::error::StorageError;

/// An upload source must exist locally.
pub fn check_upload_source(path: &Path) -> Result<(), StorageError> {
    if !path.exists() {
        return Err(StorageError::SourceMissing(path.to_path_buf()));
    }
    Ok(())
}

/// A download destination must not exist, and its parent must be an
/// existing directory.
pub fn check_download_destination(path: &Path) -> Result<(), StorageError> {
    if path.exists() {
        return Err(StorageError::DestinationExists(path.to_path_buf()));
    }

    let parent = match path.parent() {
        // A bare filename has an empty parent, which means the current directory.
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return Err(StorageError::ParentMissing(path.to_path_buf())),
    };

    if !parent.exists() {
        Err(StorageError::ParentMissing(parent.to_path_buf()))
    } else if !parent.is_dir() {
        Err(StorageError::NotADirectory(parent.to_path_buf()))
    } else {
        Ok(())
    }
}

/// Size of a local file, if it exists and is readable.
pub fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}
