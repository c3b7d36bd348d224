/// Removes every character with a code below 32 from the buffer, in place
///
/// Tabs, newlines and carriage returns go along with the other control bytes;
/// everything else keeps its relative order. Running it twice changes nothing.
///
/// # Examples
///
/// ```
/// use tiny_search::text::remove_control_bytes;
///
/// let mut html = String::from("<a\n href=\"x\">\tlink</a>\r\n");
/// remove_control_bytes(&mut html);
/// assert_eq!(html, "<a href=\"x\">link</a>");
/// ```
pub fn remove_control_bytes(buffer: &mut String) {
    buffer.retain(|c| (c as u32) >= 32);
}
