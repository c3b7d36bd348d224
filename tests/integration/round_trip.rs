use std::fs;
use std::path::Path;
use tiny_search::config::parse_config;
use tiny_search::index::{IndexOptions, InvertedIndex, MergePolicy};
use tiny_search::indexer::{build_index, reload_and_rewrite, verify_round_trip};
use tiny_search::output::IndexStatistics;
use tiny_search::SearchError;

/// Writes one page file the way the crawler saves it
fn write_page(dir: &Path, id: u32, url: &str, html: &str) {
    fs::write(dir.join(id.to_string()), format!("{}\n1\n{}", url, html)).unwrap();
}

fn create_crawl(dir: &Path) {
    write_page(
        dir,
        1,
        "http://example.com/",
        "<html><head><title>Dogs</title></head>\n<body><p>The dog chased the cat.</p></body></html>",
    );
    write_page(
        dir,
        2,
        "http://example.com/cats.html",
        "<html><body>\n<h1>Cats</h1>\n<p>A cat, a CAT, and another cat!</p>\n</body></html>",
    );
    write_page(
        dir,
        3,
        "http://example.com/misc.html",
        "<p class=\"note\">It's 2024; dogs & cats</p>",
    );
}

#[test]
fn test_build_index_from_pages() {
    let pages = tempfile::tempdir().unwrap();
    create_crawl(pages.path());
    fs::write(pages.path().join("README"), "not a page").unwrap();

    let (index, report) = build_index(pages.path(), IndexOptions::default()).unwrap();

    assert_eq!(report.pages_indexed, 3);
    assert_eq!(report.pages_skipped, 0);

    assert_eq!(index.frequency("the", 1), Some(2));
    assert_eq!(index.frequency("dog", 1), Some(1));
    assert_eq!(index.frequency("cat", 1), Some(1));
    assert_eq!(index.frequency("cat", 2), Some(3));
    assert_eq!(index.frequency("cats", 2), Some(1));
    assert_eq!(index.frequency("cats", 3), Some(1));
    assert_eq!(index.frequency("its", 3), Some(1));

    // Tag names and attribute values are not words
    assert!(index.get("html").is_none());
    assert!(index.get("note").is_none());
    assert!(index.get("class").is_none());
}

#[test]
fn test_build_skips_malformed_pages() {
    let pages = tempfile::tempdir().unwrap();
    create_crawl(pages.path());
    fs::write(pages.path().join("4"), "http://example.com/bad\nnot-a-depth\n<p>lost</p>").unwrap();

    let (index, report) = build_index(pages.path(), IndexOptions::default()).unwrap();

    assert_eq!(report.pages_indexed, 3);
    assert_eq!(report.pages_skipped, 1);
    assert!(index.get("lost").is_none());
}

#[test]
fn test_build_missing_directory() {
    let result = build_index(Path::new("/nonexistent/crawl/pages"), IndexOptions::default());
    assert!(matches!(result, Err(SearchError::Storage(_))));
}

#[test]
fn test_verify_round_trip_end_to_end() {
    let pages = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    create_crawl(pages.path());

    let options = IndexOptions::default();
    let index_path = out.path().join("index.dat");
    let reload_path = out.path().join("reload.dat");

    let (index, _) = build_index(pages.path(), options).unwrap();
    let report = verify_round_trip(&index, &index_path, &reload_path, options).unwrap();

    assert!(report.files_match());
    assert_eq!(report.words, index.word_count());
    assert_eq!(report.reload.lines_skipped, 0);
    assert_eq!(
        fs::read(&index_path).unwrap(),
        fs::read(&reload_path).unwrap()
    );

    let content = fs::read_to_string(&index_path).unwrap();
    assert!(content.contains("cat 2 1 1 2 3\n"));
    assert!(content.contains("dog 1 1 1\n"));
}

#[test]
fn test_round_trip_with_small_table() {
    let pages = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    create_crawl(pages.path());

    // A single bucket forces every word into one chain
    let options = IndexOptions {
        table_size: 1,
        ..IndexOptions::default()
    };
    let (index, _) = build_index(pages.path(), options).unwrap();
    let report = verify_round_trip(
        &index,
        &out.path().join("index.dat"),
        &out.path().join("reload.dat"),
        options,
    )
    .unwrap();

    assert!(report.files_match());
    assert_eq!(IndexStatistics::collect(&index).longest_chain, index.word_count());
}

#[test]
fn test_table_size_does_not_change_output() {
    let pages = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    create_crawl(pages.path());

    let small = IndexOptions {
        table_size: 3,
        ..IndexOptions::default()
    };
    let (a, _) = build_index(pages.path(), small).unwrap();
    let (b, _) = build_index(pages.path(), IndexOptions::default()).unwrap();

    a.serialize(&out.path().join("a.dat")).unwrap();
    b.serialize(&out.path().join("b.dat")).unwrap();

    assert_eq!(
        fs::read(out.path().join("a.dat")).unwrap(),
        fs::read(out.path().join("b.dat")).unwrap()
    );
    assert!(a.is_equivalent(&b));
}

#[test]
fn test_reload_hand_written_file() {
    let out = tempfile::tempdir().unwrap();
    let index_path = out.path().join("index.dat");
    let reload_path = out.path().join("reload.dat");

    // Unsorted documents, a malformed line, and a duplicate document
    fs::write(
        &index_path,
        "zebra 2 9 1 4 2\nbroken 3 1 1\napple 2 1 5 1 2\n",
    )
    .unwrap();

    let (index, report) =
        reload_and_rewrite(&index_path, &reload_path, IndexOptions::default()).unwrap();

    assert!(!report.files_match());
    assert_eq!(report.reload.lines_read, 3);
    assert_eq!(report.reload.lines_skipped, 1);
    assert_eq!(index.frequency("apple", 1), Some(7));
    assert_eq!(index.frequency("zebra", 4), Some(2));
    assert!(index.get("broken").is_none());

    assert_eq!(
        fs::read_to_string(&reload_path).unwrap(),
        "apple 1 1 7\nzebra 2 4 2 9 1\n"
    );
}

#[test]
fn test_reload_with_increment_policy() {
    let out = tempfile::tempdir().unwrap();
    let index_path = out.path().join("index.dat");
    fs::write(&index_path, "word 2 1 5 1 3\n").unwrap();

    let options = IndexOptions {
        merge_policy: MergePolicy::Increment,
        ..IndexOptions::default()
    };
    let index = InvertedIndex::deserialize(&index_path, options).unwrap();

    assert_eq!(index.frequency("word", 1), Some(6));
}

#[test]
fn test_build_from_config() {
    let pages = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    create_crawl(pages.path());

    let config = parse_config(&format!(
        r#"
[index]
table-size = 17
max-word-length = 4

[pages]
directory = "{}"

[output]
index-path = "{}"
reload-path = "{}"
"#,
        pages.path().display(),
        out.path().join("index.dat").display(),
        out.path().join("reload.dat").display(),
    ))
    .unwrap();

    let options = config.index_options();
    assert_eq!(options.table_size, 17);

    let (index, _) = build_index(Path::new(&config.pages.directory), options).unwrap();

    // Words are truncated to four characters
    assert_eq!(index.frequency("chas", 1), Some(1));
    assert!(index.words().all(|entry| entry.word().chars().count() <= 4));
    assert!(!index.words().any(|entry| entry.word() == "chased"));

    let report = verify_round_trip(
        &index,
        Path::new(&config.output.index_path),
        Path::new(&config.output.reload_path),
        options,
    )
    .unwrap();
    assert!(report.files_match());
}
