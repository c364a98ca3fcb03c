//! Answer comparison for typed cloze input.
//!
//! Grading is deliberately shallow: whitespace-trimmed, case-insensitive
//! equality. Anything fancier belongs to a host, not the engine.

/// Normalize an answer for comparison (trim and collapse inner whitespace).
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive, whitespace-trimmed equality.
pub fn answers_match(typed: &str, canonical: &str) -> bool {
    normalize(typed).to_lowercase() == normalize(canonical).to_lowercase()
}
