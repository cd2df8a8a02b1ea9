//! Team section detection.
//!
//! Decks are split into team sections by short divider slides that name
//! only the team. A keyword buried in a longer slide's prose does not
//! switch sections, hence the length limits.

/// Team name used before any section divider has been seen.
pub const UNASSIGNED_TEAM: &str = "Unassigned";

/// Section rules in priority order: (keywords, max slide length, team).
const TEAM_RULES: &[(&[&str], usize, &str)] = &[
    (&["qa/qc"], 100, "QA/QC"),
    (&["r&d"], 100, "R&D"),
    (&["batt dev", "battery development"], 100, "Battery Development"),
    (&["production"], 50, "Production"),
];

/// Team named by a section divider slide, if `slide_text` is one.
///
/// `slide_text` is the slide's aggregated shape text. The first matching
/// rule wins; length is counted in characters.
pub fn detect_team(slide_text: &str) -> Option<&'static str> {
    let lower = slide_text.to_lowercase();
    let length = slide_text.chars().count();

    TEAM_RULES
        .iter()
        .find(|(keywords, max_len, _)| {
            length < *max_len && keywords.iter().any(|k| lower.contains(k))
        })
        .map(|(_, _, team)| *team)
}

/// The team in effect after seeing a slide. Sticky: unchanged unless the
/// slide is a section divider.
pub fn next_team(slide_text: &str, current_team: &str) -> String {
    match detect_team(slide_text) {
        Some(team) => team.to_string(),
        None => current_team.to_string(),
    }
}
