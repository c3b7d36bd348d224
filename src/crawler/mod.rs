//! Crawler-side link discovery
//!
//! The network crawl loop lives outside this crate. What it needs from a
//! fetched page is here:
//! - Hyperlink extraction with resolution against the page URL
//! - Filtering down to textual, normalized, de-duplicated candidates

mod parser;

pub use parser::{extract_next, Links, NextLink};

use crate::text::remove_control_bytes;
use crate::url::{is_textual, normalize_url};
use std::collections::HashSet;

/// Collects the crawlable links of a fetched page
///
/// Control bytes are removed from a copy of the page first, so references
/// broken across lines still resolve. Unresolvable occurrences and links to
/// non-text resources are dropped; the rest are normalized and returned once
/// each, in order of first appearance.
///
/// # Arguments
///
/// * `html` - The page content
/// * `page_url` - Absolute URL the page was fetched from
///
/// # Returns
///
/// The normalized candidate URLs
///
/// # Example
///
/// ```
/// use tiny_search::crawler::discover_links;
///
/// let html = r#"<a href="a.html">A</a> <a href="logo.png">L</a> <a href="a.html#x">A</a>"#;
/// let links = discover_links(html, "http://x.com/index.html");
/// assert_eq!(links, vec!["http://x.com/a.html".to_string()]);
/// ```
pub fn discover_links(html: &str, page_url: &str) -> Vec<String> {
    let mut compact = html.to_string();
    remove_control_bytes(&mut compact);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for link in Links::new(&compact, page_url) {
        if !link.is_resolved() {
            continue;
        }

        if !is_textual(&link.url) {
            tracing::trace!("Skipping non-text link {}", link.url);
            continue;
        }

        match normalize_url(&link.url) {
            Ok(normalized) => {
                let normalized = normalized.to_string();
                if seen.insert(normalized.clone()) {
                    links.push(normalized);
                }
            }
            Err(e) => tracing::debug!("Failed to normalize URL {}: {}", link.url, e),
        }
    }

    tracing::debug!("Discovered {} links on {}", links.len(), page_url);
    links
}
