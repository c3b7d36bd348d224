//! Configuration module for Tiny-Search
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use tiny_search::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tiny-search.toml")).unwrap();
//! println!("Index will use {} buckets", config.index.table_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, IndexConfig, OutputConfig, PagesConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
