//! Index file persistence
//!
//! One line per word: `<word> <docCount> (<docId> <freq>)+`, single spaces,
//! newline terminated. Pairs within a line are ordered by document id and the
//! lines are sorted over the whole file before writing, so two indexes with the
//! same content produce byte-identical files no matter how their chains were
//! built.

use crate::index::{IndexError, IndexOptions, IndexResult, InvertedIndex};
use crate::storage::{load_document, StorageError};
use crate::text::sanitize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Counts gathered while reloading an index file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadReport {
    /// Non-blank lines read
    pub lines_read: usize,

    /// Lines that failed to parse and were skipped
    pub lines_skipped: usize,

    /// (word, document, frequency) triples merged into the index
    pub postings_merged: usize,
}

/// A parsed index line
#[derive(Debug, PartialEq, Eq)]
struct IndexLine<'a> {
    word: &'a str,
    postings: Vec<(u32, u32)>,
}

/// Parses one sanitized index line
///
/// Returns `Ok(None)` for a blank line and the reason for a malformed one.
fn parse_line(line: &str) -> Result<Option<IndexLine<'_>>, String> {
    let mut fields = line.split_whitespace();

    let Some(word) = fields.next() else {
        return Ok(None);
    };

    let count_field = fields.next().ok_or("missing document count")?;
    let count: usize = count_field
        .parse()
        .map_err(|_| format!("invalid document count '{}'", count_field))?;
    if count == 0 {
        return Err("document count is zero".to_string());
    }

    let numbers = fields
        .map(|field| {
            field
                .parse::<u32>()
                .map_err(|_| format!("invalid number '{}'", field))
        })
        .collect::<Result<Vec<u32>, String>>()?;

    if numbers.len() != count * 2 {
        return Err(format!(
            "expected {} document/frequency pairs, found {} numbers",
            count,
            numbers.len()
        ));
    }

    let postings: Vec<(u32, u32)> = numbers.chunks(2).map(|pair| (pair[0], pair[1])).collect();
    if let Some((document_id, _)) = postings.iter().find(|(_, frequency)| *frequency == 0) {
        return Err(format!("zero frequency for document {}", document_id));
    }

    Ok(Some(IndexLine { word, postings }))
}

impl InvertedIndex {
    /// Renders the index as sorted file lines, without line terminators
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .words()
            .map(|entry| {
                let mut documents = entry.documents().to_vec();
                documents.sort_by_key(|doc| doc.document_id);

                let mut line = format!("{} {}", entry.word(), entry.document_count());
                for doc in &documents {
                    // Writing into a String cannot fail
                    let _ = write!(line, " {} {}", doc.document_id, doc.frequency);
                }
                line
            })
            .collect();

        lines.sort();
        lines
    }

    /// Writes the index to `path`, replacing any existing file
    ///
    /// An index without words produces an empty file.
    pub fn serialize(&self, path: &Path) -> IndexResult<()> {
        let write_error = |source| IndexError::Write {
            path: path.to_path_buf(),
            source,
        };

        let lines = self.render_lines();

        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        for line in &lines {
            writeln!(writer, "{}", line).map_err(write_error)?;
        }
        writer.flush().map_err(write_error)?;

        tracing::info!("Saved {} words to {}", lines.len(), path.display());
        Ok(())
    }

    /// Rebuilds an index from a file written by [`InvertedIndex::serialize`]
    pub fn deserialize(path: &Path, options: IndexOptions) -> IndexResult<Self> {
        Self::deserialize_with_report(path, options).map(|(index, _)| index)
    }

    /// Like [`InvertedIndex::deserialize`], also returning what was read
    ///
    /// Every line is sanitized, split on whitespace, and replayed through
    /// `insert_or_merge` one (word, document, frequency) triple at a time in
    /// file order. Malformed lines are logged and skipped.
    pub fn deserialize_with_report(
        path: &Path,
        options: IndexOptions,
    ) -> IndexResult<(Self, ReloadReport)> {
        let content = match load_document(path) {
            Ok(content) => content,
            Err(StorageError::EmptyFile(_)) => {
                tracing::info!("Index file {} is empty", path.display());
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        let mut index = Self::with_options(options);
        let mut report = ReloadReport::default();

        for (number, raw) in content.lines().enumerate() {
            let line = sanitize(raw);

            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(parsed)) => {
                    report.lines_read += 1;
                    for (document_id, frequency) in parsed.postings {
                        index.insert_or_merge(parsed.word, document_id, frequency)?;
                        report.postings_merged += 1;
                    }
                }
                Err(reason) => {
                    report.lines_read += 1;
                    report.lines_skipped += 1;
                    tracing::warn!(
                        "Skipping line {} of {}: {}",
                        number + 1,
                        path.display(),
                        reason
                    );
                }
            }
        }

        tracing::info!(
            "Reloaded {} words from {} ({} lines skipped)",
            index.word_count(),
            path.display(),
            report.lines_skipped
        );

        Ok((index, report))
    }
}
