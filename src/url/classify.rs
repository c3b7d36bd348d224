/// Extensions of resources that are worth fetching and indexing as text
const TEXT_EXTENSIONS: &[&str] = &[
    "html", "htm", "shtml", "xhtml", "php", "php3", "jsp", "asp", "aspx", "cfm", "cgi", "pl",
    "txt",
];

/// Returns the last path segment of a URL, ignoring query and fragment
fn last_segment(url: &str) -> &str {
    let url = url.trim();
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];

    let path = match url.find("://") {
        Some(i) => {
            let after_scheme = &url[i + 3..];
            match after_scheme.find('/') {
                Some(j) => &after_scheme[j..],
                // Host only: no path, so no extension
                None => "",
            }
        }
        None => url,
    };

    path.rsplit('/').next().unwrap_or("")
}

/// Decides whether a URL names textual (crawlable) content
///
/// Only the suffix of the URL's path is inspected: a last segment without an
/// extension is taken to be a page, otherwise the extension must be one of the
/// known text formats. Images, PDFs, archives, media, and any other unknown
/// extension are classified as non-text.
///
/// # Examples
///
/// ```
/// use tiny_search::url::is_textual;
///
/// assert!(is_textual("http://x.com/"));
/// assert!(is_textual("http://x.com/dir/page.HTML"));
/// assert!(is_textual("http://x.com/search?q=a.jpg"));
/// assert!(!is_textual("http://x.com/logo.png"));
/// assert!(!is_textual("http://x.com/paper.pdf#page=2"));
/// ```
pub fn is_textual(url: &str) -> bool {
    let segment = last_segment(url);

    match segment.rfind('.') {
        None => true,
        Some(i) => {
            let extension = &segment[i + 1..];
            extension.is_empty()
                || TEXT_EXTENSIONS
                    .iter()
                    .any(|text| text.eq_ignore_ascii_case(extension))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_extension_is_textual() {
        assert!(is_textual("http://x.com"));
        assert!(is_textual("http://x.com/"));
        assert!(is_textual("http://x.com/about"));
        assert!(is_textual("http://x.com/dir/"));
    }

    #[test]
    fn test_host_dots_are_not_extensions() {
        assert!(is_textual("http://www.example.co.uk"));
        assert!(is_textual("http://files.example.com/downloads/"));
    }

    #[test]
    fn test_text_extensions() {
        for url in [
            "http://x.com/a.html",
            "http://x.com/a.htm",
            "http://x.com/a.php",
            "http://x.com/a.jsp",
            "http://x.com/a.aspx",
            "http://x.com/readme.txt",
            "http://x.com/A.HTML",
        ] {
            assert!(is_textual(url), "{} should be textual", url);
        }
    }

    #[test]
    fn test_binary_extensions() {
        for url in [
            "http://x.com/a.jpg",
            "http://x.com/a.jpeg",
            "http://x.com/a.png",
            "http://x.com/a.gif",
            "http://x.com/a.pdf",
            "http://x.com/a.zip",
            "http://x.com/a.tar.gz",
            "http://x.com/a.mp3",
            "http://x.com/a.mp4",
            "http://x.com/a.exe",
            "http://x.com/style.css",
            "http://x.com/app.js",
        ] {
            assert!(!is_textual(url), "{} should not be textual", url);
        }
    }

    #[test]
    fn test_unknown_extension_is_not_textual() {
        assert!(!is_textual("http://x.com/data.xyz"));
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert!(is_textual("http://x.com/page.html?img=a.png"));
        assert!(is_textual("http://x.com/list?file=b.pdf"));
        assert!(!is_textual("http://x.com/b.pdf?download=1"));
        assert!(!is_textual("http://x.com/b.pdf#page=3"));
    }

    #[test]
    fn test_deterministic_and_pure() {
        let url = String::from("http://x.com/dir/image.PNG");
        let first = is_textual(&url);
        for _ in 0..10 {
            assert_eq!(is_textual(&url), first);
        }
        assert_eq!(url, "http://x.com/dir/image.PNG");
    }
}
