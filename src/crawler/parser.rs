//! Hyperlink extraction from raw HTML
//!
//! This is a scanner, not an HTML parser. It looks for anchor start tags
//! (`<a ...>`), walks their attributes, and resolves the `href` value against
//! the URL of the page. Attribute values may be double-quoted, single-quoted,
//! or bare, and `href` may appear anywhere among the other attributes.

use crate::url::resolve_reference;

/// One hyperlink occurrence found by [`extract_next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextLink {
    /// Absolute URL of the link, or empty if the reference could not be resolved
    pub url: String,

    /// Byte offset to pass as `start` to the next call
    pub resume_at: usize,
}

impl NextLink {
    /// Returns true if the reference was resolved to an absolute URL
    pub fn is_resolved(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Outcome of walking the attributes of one anchor tag
enum AnchorScan {
    /// `href` found; value bounds and the offset just past the value
    Href {
        value: Option<(usize, usize)>,
        after: usize,
    },
    /// Tag closed without an `href`; offset just past the `>`
    NoHref(usize),
    /// Input ended inside the tag
    Unterminated,
}

fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace()
}

/// Finds the next anchor start tag at or after `from`
///
/// `<a` must be followed by whitespace or directly by `href`; the latter is
/// what `<a\nhref=...>` turns into once control bytes are removed.
fn find_anchor(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i + 2 < bytes.len() {
        if bytes[i] == b'<' && bytes[i + 1].eq_ignore_ascii_case(&b'a') {
            let rest = &bytes[i + 2..];
            let glued_href = rest
                .get(..4)
                .is_some_and(|name| name.eq_ignore_ascii_case(b"href"));
            if is_space(rest[0]) || glued_href {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Walks the attributes of a tag starting at `i` (just past the tag name)
fn scan_attributes(bytes: &[u8], mut i: usize) -> AnchorScan {
    let len = bytes.len();

    loop {
        while i < len && (is_space(bytes[i]) || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len {
            return AnchorScan::Unterminated;
        }
        if bytes[i] == b'>' {
            return AnchorScan::NoHref(i + 1);
        }

        let name_start = i;
        while i < len && !is_space(bytes[i]) && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let name = &bytes[name_start..i];

        while i < len && is_space(bytes[i]) {
            i += 1;
        }

        let mut value = None;
        if i < len && bytes[i] == b'=' {
            i += 1;
            while i < len && is_space(bytes[i]) {
                i += 1;
            }
            if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                let start = i + 1;
                let end = bytes[start..]
                    .iter()
                    .position(|&b| b == quote)
                    .map_or(len, |offset| start + offset);
                value = Some((start, end));
                i = (end + 1).min(len);
            } else {
                let start = i;
                while i < len && !is_space(bytes[i]) && bytes[i] != b'>' {
                    i += 1;
                }
                value = Some((start, i));
            }
        }

        if name.eq_ignore_ascii_case(b"href") {
            return AnchorScan::Href { value, after: i };
        }
    }
}

/// Finds the next hyperlink in `html` at or after byte `start`
///
/// # Arguments
///
/// * `html` - The page content
/// * `page_url` - Absolute URL of the page, used to resolve relative links
/// * `start` - Byte offset to scan from (0, then the previous `resume_at`)
///
/// # Returns
///
/// * `Some(NextLink)` - A link occurrence. Its `url` is empty when the reference
///   cannot be resolved (for example `../../a.html` from a page one level deep);
///   its `resume_at` is always greater than `start`
/// * `None` - No further anchors with an `href` exist
///
/// # Example
///
/// ```
/// use tiny_search::crawler::extract_next;
///
/// let html = r#"<a href="/about.html">About</a>"#;
/// let link = extract_next(html, "http://x.com/dir/page.html", 0).unwrap();
/// assert_eq!(link.url, "http://x.com/about.html");
/// assert!(extract_next(html, "http://x.com/dir/page.html", link.resume_at).is_none());
/// ```
pub fn extract_next(html: &str, page_url: &str, start: usize) -> Option<NextLink> {
    let bytes = html.as_bytes();
    let mut pos = start;

    while let Some(tag_start) = find_anchor(bytes, pos) {
        match scan_attributes(bytes, tag_start + 2) {
            AnchorScan::Href { value, after } => {
                let url = value
                    .and_then(|(begin, end)| resolve_reference(page_url, &html[begin..end]))
                    .unwrap_or_default();

                if url.is_empty() {
                    tracing::debug!(
                        "Unresolvable link at byte {} of {}",
                        tag_start,
                        page_url
                    );
                }

                return Some(NextLink {
                    url,
                    resume_at: after,
                });
            }
            AnchorScan::NoHref(next) => pos = next,
            AnchorScan::Unterminated => return None,
        }
    }

    None
}

/// Lazy sequence of the links of one page, see [`extract_next`]
///
/// Unresolvable occurrences are yielded with an empty `url`.
#[derive(Debug, Clone)]
pub struct Links<'a> {
    html: &'a str,
    page_url: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> Links<'a> {
    /// Starts scanning `html` from its first byte
    pub fn new(html: &'a str, page_url: &'a str) -> Self {
        Self {
            html,
            page_url,
            pos: 0,
            finished: false,
        }
    }
}

impl<'a> Iterator for Links<'a> {
    type Item = NextLink;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match extract_next(self.html, self.page_url, self.pos) {
            Some(link) => {
                self.pos = link.resume_at;
                Some(link)
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}
