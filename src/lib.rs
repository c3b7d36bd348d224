//! Tiny-Search: the core of a tiny search engine
//!
//! This crate extracts hyperlinks from crawled HTML so a crawler can discover new
//! pages, and builds, persists, and reloads an inverted index mapping words to the
//! documents and occurrence counts in which they appear.

pub mod config;
pub mod crawler;
pub mod index;
pub mod indexer;
pub mod output;
pub mod storage;
pub mod text;
pub mod url;

use thiserror::Error;

/// Error type for the index build and verification pipeline
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("Round-trip verification failed: {original} (sha256 {original_digest}) != {reloaded} (sha256 {reloaded_digest})")]
    VerificationFailed {
        original: String,
        original_digest: String,
        reloaded: String,
        reloaded_digest: String,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{discover_links, extract_next, Links, NextLink};
pub use index::{DocumentEntry, IndexOptions, InvertedIndex, MergeOutcome, MergePolicy, WordEntry};
pub use text::{remove_control_bytes, sanitize};
pub use url::{is_textual, normalize_url};
