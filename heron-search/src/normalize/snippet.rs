//! Snippet truncation.

/// Marker appended to truncated snippets.
pub const ELLIPSIS: char = '…';

/// Trim a snippet and cap it at `max_chars` characters.
///
/// Snippets longer than `max_chars` (counted in chars, not bytes) are cut to
/// `max_chars - 1` characters followed by [`ELLIPSIS`], so the result is
/// exactly `max_chars` long. Shorter snippets are only trimmed.
pub fn truncate_snippet(snippet: &str, max_chars: usize) -> String {
    let trimmed = snippet.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_owned();
    }

    let mut cut: String = trimmed.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}
