//! Trailing-output truncation.
//!
//! Failure diagnostics show at most the last N characters of a captured
//! stream, emitted verbatim with no truncation marker.

/// Default number of trailing characters shown on failure.
pub const DEFAULT_TAIL: usize = 500;

/// Return the last `limit` characters of `text`.
///
/// Counts characters, not bytes, so multi-byte UTF-8 is never split.
/// Text at or under the limit is returned unchanged.
pub fn tail(text: &str, limit: usize) -> &str {
    let count = text.chars().count();
    if count <= limit {
        return text;
    }
    let skip = count - limit;
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

#[cfg(test)]
#[path = "tail_tests.rs"]
mod tests;
