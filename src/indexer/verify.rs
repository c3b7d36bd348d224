//! Round-trip verification of index files

use crate::index::{IndexOptions, InvertedIndex, ReloadReport};
use crate::storage::StorageError;
use crate::SearchError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Outcome of writing an index, reloading it, and writing it again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Distinct words in the reloaded index
    pub words: usize,

    /// Hex SHA-256 of the first file
    pub original_digest: String,

    /// Hex SHA-256 of the re-serialized file
    pub reloaded_digest: String,

    /// What the reload pass read
    pub reload: ReloadReport,
}

impl VerifyReport {
    /// Returns true if both files are byte-identical
    pub fn files_match(&self) -> bool {
        self.original_digest == self.reloaded_digest
    }
}

/// Computes the hex-encoded SHA-256 of a file's bytes
pub fn file_digest(path: &Path) -> Result<String, StorageError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
        _ => StorageError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Reloads `index_path` and writes the result to `reload_path`
///
/// This is the stand-alone reload check: a file that was produced by
/// `serialize` comes back byte-identical. The report says whether it did; a
/// mismatch is not an error here because hand-edited files legitimately differ.
pub fn reload_and_rewrite(
    index_path: &Path,
    reload_path: &Path,
    options: IndexOptions,
) -> Result<(InvertedIndex, VerifyReport), SearchError> {
    let (reloaded, reload) = InvertedIndex::deserialize_with_report(index_path, options)?;
    reloaded.serialize(reload_path)?;

    let report = VerifyReport {
        words: reloaded.word_count(),
        original_digest: file_digest(index_path)?,
        reloaded_digest: file_digest(reload_path)?,
        reload,
    };

    if report.files_match() {
        tracing::info!(
            "{} and {} are identical (sha256 {})",
            index_path.display(),
            reload_path.display(),
            report.original_digest
        );
    } else {
        tracing::warn!(
            "{} and {} differ",
            index_path.display(),
            reload_path.display()
        );
    }

    Ok((reloaded, report))
}

/// Serializes `index`, reloads it, serializes the reload, and compares
///
/// # Returns
///
/// * `Ok(VerifyReport)` - Both files are byte-identical and the reloaded
///   index holds the same frequencies as `index`
/// * `Err(SearchError::VerificationFailed)` - They are not
/// * `Err(SearchError)` - A file could not be written or read
pub fn verify_round_trip(
    index: &InvertedIndex,
    index_path: &Path,
    reload_path: &Path,
    options: IndexOptions,
) -> Result<VerifyReport, SearchError> {
    index.serialize(index_path)?;
    let (reloaded, report) = reload_and_rewrite(index_path, reload_path, options)?;

    if !report.files_match() || !reloaded.is_equivalent(index) {
        return Err(SearchError::VerificationFailed {
            original: index_path.display().to_string(),
            original_digest: report.original_digest,
            reloaded: reload_path.display().to_string(),
            reloaded_digest: report.reloaded_digest,
        });
    }

    Ok(report)
}
