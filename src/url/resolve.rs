//! Resolution of link references against the URL of the page they appear on
//!
//! This is not a full URL parser. It recognises the reference
//! forms that matter for crawling (absolute, scheme-relative, root-relative,
//! query-only and document-relative) and gives up on anything else. Every
//! result is checked with the `url` crate before it is handed out.

use url::Url;

/// The pieces of an absolute page URL needed to resolve references against it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBase<'a> {
    /// Scheme without the trailing colon, e.g. `http`
    pub scheme: &'a str,

    /// Host with optional userinfo and port
    pub authority: &'a str,

    /// Path starting with `/`, without query or fragment
    pub path: &'a str,
}

impl<'a> PageBase<'a> {
    /// Splits an absolute `scheme://authority/path` URL
    ///
    /// Returns `None` if the URL has no scheme, no `//`, or an empty authority.
    pub fn parse(page_url: &'a str) -> Option<Self> {
        let page_url = page_url.trim();
        let (scheme, rest) = split_scheme(page_url)?;
        let rest = rest.strip_prefix("//")?;

        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let authority = &rest[..authority_end];
        if authority.is_empty() {
            return None;
        }

        let rest = &rest[authority_end..];
        let path_end = rest.find(['?', '#']).unwrap_or(rest.len());
        let path = &rest[..path_end];
        let path = if path.is_empty() { "/" } else { path };

        Some(Self {
            scheme,
            authority,
            path,
        })
    }

    /// The path up to and including its last `/`
    fn directory(&self) -> &'a str {
        match self.path.rfind('/') {
            Some(i) => &self.path[..=i],
            None => "/",
        }
    }
}

/// Splits `scheme:rest` if the text starts with a syntactically valid scheme
fn split_scheme(text: &str) -> Option<(&str, &str)> {
    let colon = text.find(':')?;
    let scheme = &text[..colon];

    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }

    Some((scheme, &text[colon + 1..]))
}

/// Collapses `.` and `..` segments of an absolute path
///
/// Returns `None` when a `..` would climb above the root. A path ending in
/// `/`, `.` or `..` keeps a trailing slash.
pub fn collapse_dot_segments(path: &str) -> Option<String> {
    let body = path.strip_prefix('/').unwrap_or(path);
    let mut segments: Vec<&str> = Vec::new();
    let mut parts = body.split('/').peekable();

    while let Some(segment) = parts.next() {
        let is_last = parts.peek().is_none();
        match segment {
            "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment),
        }
        if is_last && matches!(segment, "." | "..") {
            segments.push("");
        }
    }

    Some(format!("/{}", segments.join("/")))
}

/// Resolves a link reference against the page it was found on
///
/// # Arguments
///
/// * `page_url` - Absolute URL of the page holding the link
/// * `reference` - The raw `href` value
///
/// # Returns
///
/// * `Some(String)` - An absolute URL without fragment
/// * `None` - The reference cannot be safely resolved
///
/// # Examples
///
/// ```
/// use tiny_search::url::resolve_reference;
///
/// let page = "http://x.com/dir/page.html";
/// assert_eq!(resolve_reference(page, "/about.html").as_deref(), Some("http://x.com/about.html"));
/// assert_eq!(resolve_reference(page, "../top.html").as_deref(), Some("http://x.com/top.html"));
/// assert_eq!(resolve_reference(page, "../../top.html"), None);
/// ```
pub fn resolve_reference(page_url: &str, reference: &str) -> Option<String> {
    let reference = reference.trim();
    let reference = match reference.find('#') {
        Some(i) => &reference[..i],
        None => reference,
    };
    if reference.is_empty() {
        return None;
    }

    let resolved = if let Some((_, rest)) = split_scheme(reference) {
        // mailto:, javascript:, data: and friends name nothing to crawl
        if !rest.starts_with("//") {
            return None;
        }
        reference.to_string()
    } else {
        let base = PageBase::parse(page_url)?;
        resolve_relative(&base, reference)?
    };

    validate(resolved)
}

fn resolve_relative(base: &PageBase<'_>, reference: &str) -> Option<String> {
    let origin = format!("{}://{}", base.scheme, base.authority);

    if let Some(rest) = reference.strip_prefix("//") {
        return Some(format!("{}://{}", base.scheme, rest));
    }
    if reference.starts_with('/') {
        return Some(format!("{}{}", origin, reference));
    }
    if reference.starts_with('?') {
        return Some(format!("{}{}{}", origin, base.path, reference));
    }

    let (path_part, query) = match reference.find('?') {
        Some(i) => reference.split_at(i),
        None => (reference, ""),
    };
    let joined = format!("{}{}", base.directory(), path_part);
    let path = collapse_dot_segments(&joined)?;

    Some(format!("{}{}{}", origin, path, query))
}

/// Parses a candidate as an absolute URL with a host and returns its
/// serialized form
fn validate(candidate: String) -> Option<String> {
    match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => {
            Some(url.to_string())
        }
        Ok(_) => None,
        Err(e) => {
            tracing::trace!("Rejecting resolved URL {}: {}", candidate, e);
            None
        }
    }
}
