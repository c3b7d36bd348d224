//! URL handling module for Tiny-Search
//!
//! This module provides reference resolution against a page URL, the textual
//! content classifier, and normalization for crawler de-duplication.

mod classify;
mod normalize;
mod resolve;

// Re-export main functions
pub use classify::is_textual;
pub use normalize::normalize_url;
pub use resolve::{collapse_dot_segments, resolve_reference, PageBase};
