//! UTF-8–safe text shaping for the budgeting pipeline.
//!
//! `&str[..n]` panics when `n` falls inside a multi-byte character, so every
//! trim in the engine goes through these helpers, which snap to the nearest
//! char boundary. Budgets are in bytes.

/// Longest prefix of `s` that is at most `max_bytes` long and does not
/// split a multi-byte character.
#[inline]
#[must_use]
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    // `floor_char_boundary` is nightly-only; walk back by hand.
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Longest suffix of `s` that is at most `max_bytes` long and does not
/// split a multi-byte character.
#[inline]
#[must_use]
pub fn truncate_str_end(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut start = s.len() - max_bytes;
    while start < s.len() && !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

/// Truncate `s` and append `suffix` if the original exceeds `max_bytes`.
///
/// The result is at most `max_bytes` long, suffix included. A string that
/// already fits is returned unchanged.
#[must_use]
pub fn truncate_with_suffix(s: &str, max_bytes: usize, suffix: &str) -> String {
    if s.len() <= max_bytes {
        return s.to_owned();
    }
    let body_budget = max_bytes.saturating_sub(suffix.len());
    let prefix = truncate_str(s, body_budget);
    format!("{prefix}{suffix}")
}

/// Keep the first `head_bytes` and last `tail_bytes` of `s`, joined by
/// `marker`, when the string is longer than the two windows combined.
///
/// Used by the compressor: the head carries intent, the tail carries any
/// trailing specifics. A string that fits is returned unchanged.
#[must_use]
pub fn head_tail(s: &str, head_bytes: usize, tail_bytes: usize, marker: &str) -> String {
    if s.len() <= head_bytes + tail_bytes + marker.len() {
        return s.to_owned();
    }
    let head = truncate_str(s, head_bytes);
    let tail = truncate_str_end(s, tail_bytes);
    format!("{head}{marker}{tail}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
