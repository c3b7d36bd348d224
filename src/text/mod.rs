//! Text preprocessing for crawled pages
//!
//! This module holds the byte-level filters applied to raw page text before
//! link extraction or tokenizing:
//! - Control byte removal (whitespace compaction)
//! - Sanitization to the safe ASCII subset used by the index format
//! - Word tokenizing outside of HTML tags

mod compact;
mod sanitize;
mod tokenize;

pub use compact::remove_control_bytes;
pub use sanitize::sanitize;
pub use tokenize::{next_word, to_lower_ascii, words, Words};
