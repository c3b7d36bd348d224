//! Statistics about an inverted index
//!
//! This module summarizes the shape of an index (how many words, how full the
//! hash table is) and prints the summary for the command-line driver.

use crate::index::InvertedIndex;

/// Index statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatistics {
    /// Number of hash buckets
    pub table_size: usize,

    /// Buckets holding at least one word
    pub occupied_buckets: usize,

    /// Length of the longest bucket chain
    pub longest_chain: usize,

    /// Distinct words
    pub words: usize,

    /// (word, document) entries
    pub document_entries: usize,

    /// Word occurrences summed over every entry
    pub total_occurrences: u64,

    /// Distinct document ids seen
    pub documents: usize,
}

impl IndexStatistics {
    /// Walks the index once and gathers its statistics
    pub fn collect(index: &InvertedIndex) -> Self {
        let buckets = index.buckets();
        let mut documents = std::collections::BTreeSet::new();
        let mut total_occurrences = 0u64;

        for entry in index.words() {
            total_occurrences += entry.total_frequency();
            documents.extend(entry.documents().iter().map(|doc| doc.document_id));
        }

        Self {
            table_size: buckets.len(),
            occupied_buckets: buckets.iter().filter(|chain| !chain.is_empty()).count(),
            longest_chain: buckets.iter().map(Vec::len).max().unwrap_or(0),
            words: index.word_count(),
            document_entries: index.document_entry_count(),
            total_occurrences,
            documents: documents.len(),
        }
    }

    /// Percentage of buckets in use
    pub fn load_factor(&self) -> f64 {
        if self.table_size > 0 {
            (self.occupied_buckets as f64 / self.table_size as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Mean chain length over occupied buckets
    pub fn average_chain(&self) -> f64 {
        if self.occupied_buckets > 0 {
            self.words as f64 / self.occupied_buckets as f64
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &IndexStatistics) {
    println!("=== Index Statistics ===\n");

    println!("Overview:");
    println!("  Distinct words: {}", stats.words);
    println!("  Documents: {}", stats.documents);
    println!("  Word/document entries: {}", stats.document_entries);
    println!("  Total occurrences: {}", stats.total_occurrences);
    println!();

    println!("Hash Table:");
    println!("  Buckets: {}", stats.table_size);
    println!(
        "  Occupied: {} ({:.1}%)",
        stats.occupied_buckets,
        stats.load_factor()
    );
    println!("  Longest chain: {}", stats.longest_chain);
    println!("  Average chain: {:.2}", stats.average_chain());
}
