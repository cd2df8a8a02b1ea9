//! Cell text cleanup and lenient number parsing.
//!
//! Scores and percentages in assessment decks are typed by hand ("4.2/5",
//! "3 %", "Rating: 4"), so numbers are read from the first decimal literal
//! found anywhere in the text.

use regex::Regex;
use std::sync::LazyLock;

/// Regex matching an unsigned decimal literal in ASCII digits.
static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

/// Non-breaking space, common in table cells pasted from other documents.
const NBSP: char = '\u{00A0}';

/// Normalize a cell's text: non-breaking spaces become regular spaces and
/// surrounding whitespace is trimmed.
pub fn clean_text(text: &str) -> String {
    text.replace(NBSP, " ").trim().to_string()
}

/// Lowercased, trimmed text used for keyword matching on raw cells.
pub fn lower_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Parse the first unsigned decimal literal in `text`.
///
/// Returns 0.0 when the text holds no digits. Never fails.
pub fn parse_number(text: &str) -> f64 {
    NUMBER_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
