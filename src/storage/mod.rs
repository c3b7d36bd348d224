//! Storage module for reading crawler output and index files
//!
//! This module handles the file-level concerns shared by page loading and index
//! reloading:
//! - Loading a whole file into one owned buffer
//! - Listing and parsing the crawler's saved page files

mod pages;

pub use pages::{list_pages, read_page, CrawledPage};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading files
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("Malformed page file {}: {reason}", .path.display())]
    MalformedPage { path: PathBuf, reason: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Reads an entire file into one freshly allocated buffer
///
/// Both page loading and index reloading treat a file as an opaque blob, so
/// they share this loader. Bytes that are not valid UTF-8 are replaced; the
/// sanitizer only keeps ASCII anyway.
///
/// # Arguments
///
/// * `path` - Path of the file to load
///
/// # Returns
///
/// * `Ok(String)` - The whole file content
/// * `Err(StorageError)` - The file is missing, unreadable, or empty
pub fn load_document(path: &Path) -> StorageResult<String> {
    let bytes = std::fs::read(path).map_err(|e| StorageError::from_io(path, e))?;

    if bytes.is_empty() {
        return Err(StorageError::EmptyFile(path.to_path_buf()));
    }

    tracing::trace!("Loaded {} bytes from {}", bytes.len(), path.display());

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
