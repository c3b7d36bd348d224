use crate::UrlError;
use url::Url;

/// Normalizes a discovered URL so the crawler can de-duplicate it
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an HTTP or HTTPS scheme and a host
/// 3. Lowercase the host (the parser also resolves `.` and `..` segments)
/// 4. Remove the fragment
/// 5. Collapse duplicate slashes and remove a trailing slash (except for root)
///
/// The query string is kept as found.
///
/// # Examples
///
/// ```
/// use tiny_search::url::normalize_url;
///
/// let url = normalize_url("http://X.COM//docs/./guide/#intro").unwrap();
/// assert_eq!(url.as_str(), "http://x.com/docs/guide");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_lowercase(),
        _ => return Err(UrlError::MissingDomain),
    };
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Parse(e.to_string()))?;

    url.set_fragment(None);

    let path = tidy_path(url.path());
    url.set_path(&path);

    Ok(url)
}

/// Drops empty segments so `//` collapses and a trailing `/` disappears
fn tidy_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}
