//! Response splitting.

/// Splits `text` on every occurrence of `delimiter`. Segments are not trimmed.
#[must_use]
pub fn split(text: &str, delimiter: &str) -> Vec<String> {
    text.split(delimiter).map(str::to_string).collect()
}

/// Drops whitespace-only segments at the end only, which is what a trailing
/// delimiter leaves behind. Interior segments keep their positions.
pub fn trim_trailing_blank(segments: &mut Vec<String>) {
    while segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }
}
