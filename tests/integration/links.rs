use std::fs;
use tiny_search::crawler::{discover_links, extract_next, Links};
use tiny_search::storage::read_page;

const PAGE: &str = r##"<html>
<head><link rel="stylesheet" href="/style.css"></head>
<body>
<A HREF="about.html">About</A>
<a class="nav" href='../up/index.php?x=1#top'>Up</a>
<a href="http://OTHER.example.org/docs/">Docs</a>
<a href="#section">Jump</a>
<a href="mailto:someone@example.com">Mail</a>
<a href="images/logo.png">Logo</a>
<a href="about.html#team">Team</a>
<a href="//cdn.example.net/readme.txt">Readme</a>
<a href="/a/b/../../c">C</a>
</body>
</html>"##;

#[test]
fn test_discover_links_from_page_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("7");
    fs::write(&path, format!("http://example.com/site/page.html\n2\n{}", PAGE)).unwrap();

    let page = read_page(&path).unwrap();
    assert_eq!(page.depth, 2);

    let links = discover_links(&page.html, &page.url);

    assert_eq!(
        links,
        vec![
            "http://example.com/site/about.html".to_string(),
            "http://example.com/up/index.php?x=1".to_string(),
            "http://other.example.org/docs".to_string(),
            "http://cdn.example.net/readme.txt".to_string(),
            "http://example.com/c".to_string(),
        ]
    );
}

#[test]
fn test_links_iterator_reports_unresolvable() {
    let base = "http://example.com/site/page.html";
    let all: Vec<_> = Links::new(PAGE, base).collect();

    // The stylesheet <link> is not an anchor
    assert_eq!(all.len(), 9);

    let unresolved = all.iter().filter(|link| !link.is_resolved()).count();
    assert_eq!(unresolved, 2);
}

#[test]
fn test_extract_next_resumes_forward() {
    let base = "http://example.com/";
    let mut pos = 0;
    let mut found = Vec::new();

    while let Some(link) = extract_next(PAGE, base, pos) {
        assert!(link.resume_at > pos);
        pos = link.resume_at;
        found.push(link.url);
    }

    assert_eq!(found.first().map(String::as_str), Some("http://example.com/about.html"));
    assert_eq!(found.len(), 9);
}

#[test]
fn test_discover_links_joins_split_reference() {
    let html = "<a href=\"docs/intro\r\n.html\">Intro</a>";
    let links = discover_links(html, "http://example.com/");
    assert_eq!(links, vec!["http://example.com/docs/intro.html".to_string()]);
}

#[test]
fn test_discover_links_across_line_broken_tags() {
    let html = "<ul>\n<li><a\nhref=\"/next.html\">Next</a></li>\n\
                <li><A\r\n   HREF='chapter2.html'\n  title=\"Two\">Two</A></li>\n\
                <li><a\nhref=\"cover.jpg\">Cover</a></li>\n</ul>";
    let links = discover_links(html, "http://example.com/book/ch1.html");

    assert_eq!(
        links,
        vec![
            "http://example.com/next.html".to_string(),
            "http://example.com/book/chapter2.html".to_string(),
        ]
    );
}
