//! Relevance scoring for combined queries.

use crate::domain::Note;

/// Bonus when the free text occurs in the title.
pub const TITLE_MATCH_SCORE: f64 = 10.0;
/// Bonus when the free text occurs in the content.
pub const CONTENT_MATCH_SCORE: f64 = 5.0;
/// Bonus per satisfied `#tag` filter.
pub const TAG_MATCH_SCORE: f64 = 3.0;

/// Scores a candidate note.
///
/// `text_lower` is the lowercased free-text portion, if any; matching is a
/// case-insensitive substring test against title and content.
pub fn score(note: &Note, text_lower: Option<&str>, matched_tags: usize) -> f64 {
    let mut score = 0.0;
    if let Some(text) = text_lower {
        if note.title().to_lowercase().contains(text) {
            score += TITLE_MATCH_SCORE;
        }
        if note.content().to_lowercase().contains(text) {
            score += CONTENT_MATCH_SCORE;
        }
    }
    score + TAG_MATCH_SCORE * matched_tags as f64
}
