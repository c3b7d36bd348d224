//! Word tokenizing for page indexing
//!
//! A word is a maximal run of ASCII letters that appears outside of any
//! `<...>` markup. Words come back lower-cased so the index stays
//! case-normalized.

/// Lower-cases the ASCII capitals of a buffer in place
pub fn to_lower_ascii(buffer: &mut String) {
    buffer.make_ascii_lowercase();
}

/// Finds the next word in `html` at or after byte `pos`
///
/// # Arguments
///
/// * `html` - Page text, usually already sanitized
/// * `pos` - Byte offset to resume scanning from
///
/// # Returns
///
/// * `Some((word, next_pos))` - The lower-cased word and the offset just past it
/// * `None` - No word remains
///
/// # Examples
///
/// ```
/// use tiny_search::text::next_word;
///
/// let html = "<p class=\"x\">Hello</p> World";
/// let (word, pos) = next_word(html, 0).unwrap();
/// assert_eq!(word, "hello");
/// let (word, _) = next_word(html, pos).unwrap();
/// assert_eq!(word, "world");
/// ```
pub fn next_word(html: &str, pos: usize) -> Option<(String, usize)> {
    let bytes = html.as_bytes();
    let mut i = pos;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'<' {
            // Skip the whole tag; an unclosed tag swallows the rest of the input
            match bytes[i..].iter().position(|&c| c == b'>') {
                Some(offset) => i += offset + 1,
                None => return None,
            }
            continue;
        }

        if b.is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mut word = html[start..i].to_string();
            to_lower_ascii(&mut word);
            return Some((word, i));
        }

        i += 1;
    }

    None
}

/// Iterator over the words of a page, see [`next_word`]
#[derive(Debug, Clone)]
pub struct Words<'a> {
    html: &'a str,
    pos: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let (word, pos) = next_word(self.html, self.pos)?;
        self.pos = pos;
        Some(word)
    }
}

/// Returns an iterator over every word of `html`
pub fn words(html: &str) -> Words<'_> {
    Words { html, pos: 0 }
}
