//! Day-list tokenizing
//!
//! A day-list cell holds day numbers separated by commas or periods, e.g.
//! `"01, 02.3"`. Comparison tokens have leading zeros stripped; count tokens
//! are taken as written.

const SEPARATORS: [char; 2] = [',', '.'];

/// Raw tokens: split on commas and periods, trimmed, empty pieces dropped
pub fn split_day_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(SEPARATORS.as_slice())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Comparison tokens in cell order, duplicates kept
///
/// Tokens that are all zeros vanish after stripping and are dropped.
pub fn normalize_day_tokens(raw: &str) -> Vec<String> {
    split_day_list(raw)
        .map(|token| token.trim_start_matches('0'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of day tokens as written; blank cells count zero
pub fn count_day_tokens(raw: &str) -> usize {
    split_day_list(raw).count()
}
