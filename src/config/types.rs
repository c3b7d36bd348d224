use crate::index::{IndexOptions, MergePolicy, DEFAULT_MAX_WORD_LENGTH, DEFAULT_TABLE_SIZE};
use serde::Deserialize;

/// Main configuration structure for Tiny-Search
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    pub pages: PagesConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Index shape described by the `[index]` section
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            table_size: self.index.table_size,
            max_word_length: self.index.max_word_length,
            merge_policy: self.index.merge_policy,
        }
    }
}

/// Inverted index configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Number of hash buckets
    #[serde(rename = "table-size", default = "default_table_size")]
    pub table_size: usize,

    /// Longest word kept, in characters
    #[serde(rename = "max-word-length", default = "default_max_word_length")]
    pub max_word_length: usize,

    /// How repeated (word, document) observations combine
    #[serde(rename = "merge-policy", default)]
    pub merge_policy: MergePolicy,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            table_size: default_table_size(),
            max_word_length: default_max_word_length(),
            merge_policy: MergePolicy::default(),
        }
    }
}

fn default_table_size() -> usize {
    DEFAULT_TABLE_SIZE
}

fn default_max_word_length() -> usize {
    DEFAULT_MAX_WORD_LENGTH
}

/// Crawler output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    /// Directory of page files named by document id
    pub directory: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the index file
    #[serde(rename = "index-path")]
    pub index_path: String,

    /// Path the reloaded index is written to during verification
    #[serde(rename = "reload-path")]
    pub reload_path: String,
}
