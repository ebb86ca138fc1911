//! Answer scoring
//!
//! Exact match after trimming surrounding whitespace and lowercasing.
//! No partial credit, no fuzzy matching.

/// Normalized form used on both sides of the comparison
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Is `input` an acceptable answer for `expected`?
pub fn answers_match(input: &str, expected: &str) -> bool {
    normalize_answer(input) == normalize_answer(expected)
}
