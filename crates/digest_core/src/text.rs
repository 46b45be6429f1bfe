/// Input cap for the summarizer; counts characters, not model tokens.
pub const MAX_SUMMARY_INPUT_CHARS: usize = 1024;

/// Keeps at most `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
