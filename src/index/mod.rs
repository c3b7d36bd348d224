//! Inverted index engine
//!
//! This module owns the in-memory word -> documents structure:
//! - A fixed-size hash table of word chains
//! - The insert-or-merge algorithm that keeps words and documents unique
//! - Persistence to and from the line-oriented index file (see `persist`)

mod hash;
mod persist;

pub use hash::hash_word;
pub use persist::ReloadReport;

use crate::storage::StorageError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Number of buckets used when no size is configured
pub const DEFAULT_TABLE_SIZE: usize = 10_000;

/// Longest word, in characters, kept by the index; longer words are truncated
pub const DEFAULT_MAX_WORD_LENGTH: usize = 1_000;

/// Errors that can occur while building, saving, or reloading an index
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Word must not be empty")]
    EmptyWord,

    #[error("Word must not contain whitespace: {0:?}")]
    InvalidWord(String),

    #[error("Frequency must be at least 1 (word '{word}', document {document_id})")]
    InvalidFrequency { word: String, document_id: u32 },

    #[error("Failed to write index file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read index file: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Rule for combining a new observation with an existing document entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Add the supplied frequency to the stored one
    #[default]
    Accumulate,
    /// Add one to the stored frequency, whatever was supplied
    Increment,
}

/// Shape and behavior of an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Number of hash buckets
    pub table_size: usize,

    /// Longest word kept, in characters
    pub max_word_length: usize,

    /// How repeated (word, document) observations combine
    pub merge_policy: MergePolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            table_size: DEFAULT_TABLE_SIZE,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            merge_policy: MergePolicy::default(),
        }
    }
}

/// One document's occurrence count for a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentEntry {
    pub document_id: u32,
    pub frequency: u32,
}

/// A distinct word and the documents it appears in, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    documents: Vec<DocumentEntry>,
}

impl WordEntry {
    fn new(word: &str, document_id: u32, frequency: u32) -> Self {
        Self {
            word: word.to_string(),
            documents: vec![DocumentEntry {
                document_id,
                frequency,
            }],
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn documents(&self) -> &[DocumentEntry] {
        &self.documents
    }

    /// Number of documents containing the word
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Occurrences of the word summed over all documents
    pub fn total_frequency(&self) -> u64 {
        self.documents.iter().map(|d| u64::from(d.frequency)).sum()
    }
}

/// Which path `insert_or_merge` took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The bucket was empty; a new word became its head
    EmptyBucket,
    /// The bucket held other words; a new word was appended to the chain
    WordNotFound,
    /// The word existed; a new document was appended to its chain
    WordFoundDocNotFound,
    /// The word and document existed; the frequency was merged
    WordFoundDocFound,
}

/// Fixed-size hash table mapping words to the documents they appear in
///
/// The index owns every word entry and each word entry owns its documents, so
/// dropping the index releases everything. It is not synchronized: one builder
/// or reload pass mutates it at a time through `&mut self`.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    buckets: Vec<Vec<WordEntry>>,
    options: IndexOptions,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Cuts a word down to at most `max` characters
fn truncate_word(word: &str, max: usize) -> &str {
    match word.char_indices().nth(max) {
        Some((end, _)) => &word[..end],
        None => word,
    }
}

impl InvertedIndex {
    /// Creates an empty index with the default options
    pub fn new() -> Self {
        Self::with_options(IndexOptions::default())
    }

    /// Creates an empty index; a table size of 0 is raised to 1
    pub fn with_options(options: IndexOptions) -> Self {
        let options = IndexOptions {
            table_size: options.table_size.max(1),
            max_word_length: options.max_word_length.max(1),
            ..options
        };

        Self {
            buckets: vec![Vec::new(); options.table_size],
            options,
        }
    }

    pub fn options(&self) -> IndexOptions {
        self.options
    }

    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket a word hashes into
    pub fn bucket_of(&self, word: &str) -> usize {
        // The remainder is below table_size, so it fits in usize
        (hash_word(word) % self.buckets.len() as u64) as usize
    }

    /// Records that `word` appears `frequency` times in `document_id`
    ///
    /// The word is truncated to the configured maximum length, then looked up
    /// in its bucket. A missing word is appended to the end of the bucket chain;
    /// a missing document is appended to the end of the word's document chain;
    /// an existing document has its frequency merged according to the index's
    /// [`MergePolicy`].
    ///
    /// # Returns
    ///
    /// * `Ok(MergeOutcome)` - The path taken
    /// * `Err(IndexError)` - The word is empty or contains whitespace, or the
    ///   frequency is 0; the index is left unchanged
    pub fn insert_or_merge(
        &mut self,
        word: &str,
        document_id: u32,
        frequency: u32,
    ) -> IndexResult<MergeOutcome> {
        if word.is_empty() {
            return Err(IndexError::EmptyWord);
        }
        if word.chars().any(char::is_whitespace) {
            return Err(IndexError::InvalidWord(word.to_string()));
        }
        if frequency == 0 {
            return Err(IndexError::InvalidFrequency {
                word: word.to_string(),
                document_id,
            });
        }

        let word = truncate_word(word, self.options.max_word_length);
        let slot = self.bucket_of(word);
        let policy = self.options.merge_policy;
        let chain = &mut self.buckets[slot];

        if chain.is_empty() {
            chain.push(WordEntry::new(word, document_id, frequency));
            return Ok(MergeOutcome::EmptyBucket);
        }

        let Some(entry) = chain.iter_mut().find(|entry| entry.word == word) else {
            chain.push(WordEntry::new(word, document_id, frequency));
            return Ok(MergeOutcome::WordNotFound);
        };

        match entry
            .documents
            .iter_mut()
            .find(|doc| doc.document_id == document_id)
        {
            Some(doc) => {
                doc.frequency = match policy {
                    MergePolicy::Accumulate => doc.frequency.saturating_add(frequency),
                    MergePolicy::Increment => doc.frequency.saturating_add(1),
                };
                Ok(MergeOutcome::WordFoundDocFound)
            }
            None => {
                entry.documents.push(DocumentEntry {
                    document_id,
                    frequency,
                });
                Ok(MergeOutcome::WordFoundDocNotFound)
            }
        }
    }

    /// Releases every word and document, keeping the table size
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
    }

    /// Looks up a word (truncated the same way as on insert)
    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        let word = truncate_word(word, self.options.max_word_length);
        self.buckets[self.bucket_of(word)]
            .iter()
            .find(|entry| entry.word == word)
    }

    /// Stored frequency of `word` in `document_id`
    pub fn frequency(&self, word: &str, document_id: u32) -> Option<u32> {
        self.get(word)?
            .documents
            .iter()
            .find(|doc| doc.document_id == document_id)
            .map(|doc| doc.frequency)
    }

    /// Every word entry, bucket by bucket in chain order
    pub fn words(&self) -> impl Iterator<Item = &WordEntry> {
        self.buckets.iter().flatten()
    }

    pub fn buckets(&self) -> &[Vec<WordEntry>] {
        &self.buckets
    }

    /// Number of distinct words
    pub fn word_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Number of (word, document) entries
    pub fn document_entry_count(&self) -> usize {
        self.words().map(WordEntry::document_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    fn postings(&self) -> BTreeMap<(&str, u32), u32> {
        self.words()
            .flat_map(|entry| {
                entry
                    .documents
                    .iter()
                    .map(move |doc| ((entry.word.as_str(), doc.document_id), doc.frequency))
            })
            .collect()
    }

    /// Returns true if both indexes hold the same frequency for every
    /// (word, document) pair, regardless of table size or chain order
    pub fn is_equivalent(&self, other: &InvertedIndex) -> bool {
        self.postings() == other.postings()
    }
}
