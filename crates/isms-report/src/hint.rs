//! One-line remediation hints.

/// First sentence of `text`, flattened to one line.
///
/// A sentence ends at a `.` followed by whitespace or the end of the text.
/// Text without such a terminator is returned whole.
pub fn first_sentence(text: &str) -> String {
    let text = text.trim();
    let mut end = text.len();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '.' && chars.peek().map_or(true, |&(_, next)| next.is_whitespace()) {
            end = i + c.len_utf8();
            break;
        }
    }
    text[..end].split_whitespace().collect::<Vec<_>>().join(" ")
}
