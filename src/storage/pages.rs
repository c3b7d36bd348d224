//! Crawled page files
//!
//! The crawler saves every fetched page into one directory, one file per page,
//! named by the page's decimal document id. Line 1 holds the page URL, line 2
//! the crawl depth, and the rest is the HTML as fetched.

use crate::storage::{load_document, StorageError, StorageResult};
use std::path::{Path, PathBuf};

/// A saved page as written by the crawler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawledPage {
    /// The URL the page was fetched from
    pub url: String,

    /// Crawl depth at which the page was found
    pub depth: u32,

    /// Page body
    pub html: String,
}

impl CrawledPage {
    /// Parses the content of a page file
    ///
    /// Returns the reason as an error string if the header lines are missing
    /// or the depth is not a number.
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut parts = content.splitn(3, '\n');

        let url = parts
            .next()
            .map(|line| line.trim_end_matches('\r').trim())
            .filter(|line| !line.is_empty())
            .ok_or_else(|| "missing URL line".to_string())?;

        let depth_line = parts
            .next()
            .ok_or_else(|| "missing depth line".to_string())?
            .trim();
        let depth = depth_line
            .parse::<u32>()
            .map_err(|e| format!("invalid depth '{}': {}", depth_line, e))?;

        let html = parts.next().unwrap_or_default();

        Ok(Self {
            url: url.to_string(),
            depth,
            html: html.to_string(),
        })
    }
}

/// Reads and parses one page file
pub fn read_page(path: &Path) -> StorageResult<CrawledPage> {
    let content = load_document(path)?;
    CrawledPage::parse(&content).map_err(|reason| StorageError::MalformedPage {
        path: path.to_path_buf(),
        reason,
    })
}

/// Lists the page files of a crawler output directory
///
/// Entries whose file name is not a decimal document id are ignored.
///
/// # Returns
///
/// `(document_id, path)` pairs sorted by document id
pub fn list_pages(dir: &Path) -> StorageResult<Vec<(u32, PathBuf)>> {
    let entries = std::fs::read_dir(dir).map_err(|e| StorageError::from_io(dir, e))?;

    let mut pages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StorageError::from_io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let id = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.parse::<u32>().ok());

        match id {
            Some(id) => pages.push((id, path)),
            None => tracing::trace!("Skipping non-page file {}", path.display()),
        }
    }

    pages.sort_by_key(|(id, _)| *id);
    Ok(pages)
}
