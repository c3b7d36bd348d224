//! Output module for reporting on indexes
//!
//! This module handles:
//! - Gathering index statistics
//! - Printing them for the command-line driver

pub mod stats;

pub use stats::{print_statistics, IndexStatistics};
