//! Indexer pipeline
//!
//! Turns a directory of crawled page files into an inverted index and checks
//! that the index survives a trip through its file format:
//! - Page reading, sanitizing, and tokenizing
//! - Insert-or-merge of every word occurrence
//! - Serialize / reload / re-serialize verification

mod verify;

pub use verify::{file_digest, reload_and_rewrite, verify_round_trip, VerifyReport};

use crate::index::{IndexOptions, IndexResult, InvertedIndex};
use crate::storage::{list_pages, read_page};
use crate::text::{sanitize, words};
use crate::SearchError;
use std::path::Path;

/// Counts gathered while building an index from page files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages whose words made it into the index
    pub pages_indexed: usize,

    /// Pages that could not be read or parsed
    pub pages_skipped: usize,

    /// Word occurrences inserted
    pub words_seen: usize,
}

/// Indexes every word of one page under `document_id`
///
/// Whitespace is turned into plain spaces so sanitizing cannot glue words
/// together across lines; the sanitized text is then tokenized and each word
/// occurrence is merged with frequency 1.
///
/// # Returns
///
/// The number of word occurrences inserted
pub fn index_page(index: &mut InvertedIndex, document_id: u32, html: &str) -> IndexResult<usize> {
    let spaced: String = html
        .chars()
        .map(|c| if c.is_ascii_whitespace() { ' ' } else { c })
        .collect();
    let clean = sanitize(&spaced);

    let mut count = 0;
    for word in words(&clean) {
        index.insert_or_merge(&word, document_id, 1)?;
        count += 1;
    }

    Ok(count)
}

/// Builds an index from a crawler output directory
///
/// Pages are processed in document id order. A page that cannot be read or
/// whose header is malformed is logged and skipped.
///
/// # Arguments
///
/// * `pages_dir` - Directory of page files named by document id
/// * `options` - Shape of the index to build
///
/// # Returns
///
/// * `Ok((InvertedIndex, BuildReport))` - The index and what went into it
/// * `Err(SearchError)` - The directory could not be listed
pub fn build_index(
    pages_dir: &Path,
    options: IndexOptions,
) -> Result<(InvertedIndex, BuildReport), SearchError> {
    let pages = list_pages(pages_dir)?;
    tracing::info!("Indexing {} pages from {}", pages.len(), pages_dir.display());

    let mut index = InvertedIndex::with_options(options);
    let mut report = BuildReport::default();

    for (document_id, path) in pages {
        let page = match read_page(&path) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skipping page {}: {}", document_id, e);
                report.pages_skipped += 1;
                continue;
            }
        };

        let count = index_page(&mut index, document_id, &page.html)?;
        tracing::debug!(
            "Indexed document {} ({}) with {} words",
            document_id,
            page.url,
            count
        );

        report.pages_indexed += 1;
        report.words_seen += count;
    }

    tracing::info!(
        "Built index: {} pages, {} distinct words, {} pages skipped",
        report.pages_indexed,
        index.word_count(),
        report.pages_skipped
    );

    Ok((index, report))
}
