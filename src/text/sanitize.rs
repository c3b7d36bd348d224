//! Sanitization of text before tokenizing
//!
//! The kept subset is printable ASCII minus most punctuation. `&`, `<` and `>`
//! survive on purpose: the word tokenizer uses the angle brackets to skip tags,
//! and reloading an index file sanitizes each line before splitting it.

/// Returns true if the byte survives sanitization
fn is_kept(byte: u8) -> bool {
    match byte {
        // Control bytes up to carriage return
        0..=13 => false,
        // Apostrophe, comma, period, double quote
        b'\'' | b',' | b'.' | b'"' => false,
        // '!' through ',' except '&'
        33..=44 => byte == b'&',
        // ';' through '@' except '<' and '>'
        59..=64 => byte == b'<' || byte == b'>',
        // '[' through '`'
        91..=96 => false,
        // '{' through DEL
        123..=127 => false,
        // Anything outside ASCII
        128..=255 => false,
        _ => true,
    }
}

/// Produces a cleaned copy of `text` restricted to the safe character subset
///
/// # Arguments
///
/// * `text` - The text to clean
///
/// # Returns
///
/// A new string holding only the surviving bytes, in their original order
///
/// # Examples
///
/// ```
/// use tiny_search::text::sanitize;
///
/// assert_eq!(sanitize("It's a \"test\", #1!"), "Its a test 1");
/// assert_eq!(sanitize("<b>R&D</b>"), "<b>R&D</b>");
/// ```
pub fn sanitize(text: &str) -> String {
    let kept: Vec<u8> = text.bytes().filter(|&b| is_kept(b)).collect();

    // Only ASCII bytes survive, so the result is always valid UTF-8
    kept.into_iter().map(char::from).collect()
}
