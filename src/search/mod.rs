//! Combined text and tag search over a note snapshot.

mod engine;
mod highlight;
mod query;
mod score;

pub use engine::SearchEngine;
pub use highlight::{ELLIPSIS, Highlighter, MARK_CLOSE, MARK_OPEN, strip_marks};
pub use query::ParsedQuery;
pub use score::{CONTENT_MATCH_SCORE, TAG_MATCH_SCORE, TITLE_MATCH_SCORE, score};

use crate::domain::{Note, NoteId};
use crate::index::{Field, NoteIndex};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Instant;

/// Default maximum number of results.
pub const DEFAULT_LIMIT: usize = 50;
/// Default snippet length in characters.
pub const DEFAULT_SNIPPET_LENGTH: usize = 150;

/// Options for [`search_notes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub snippet_length: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            snippet_length: DEFAULT_SNIPPET_LENGTH,
        }
    }
}

impl SearchOptions {
    /// Sets the maximum number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the approximate snippet length.
    pub fn with_snippet_length(mut self, snippet_length: usize) -> Self {
        self.snippet_length = snippet_length;
        self
    }
}

/// A ranked search result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    note: Note,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlighted_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlighted_content: Option<String>,
    matched_fields: BTreeSet<Field>,
}

impl SearchResult {
    /// Returns the matched note.
    pub fn note(&self) -> &Note {
        &self.note
    }

    /// Returns the relevance score (higher is more relevant).
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the title with emphasis markers, for text queries.
    pub fn highlighted_title(&self) -> Option<&str> {
        self.highlighted_title.as_deref()
    }

    /// Returns a highlighted content snippet, for text queries.
    pub fn highlighted_content(&self) -> Option<&str> {
        self.highlighted_content.as_deref()
    }

    /// Returns the fields that matched.
    pub fn matched_fields(&self) -> &BTreeSet<Field> {
        &self.matched_fields
    }
}

/// Runs a combined query against `index` and the snapshot `notes` it was
/// built from.
///
/// The query is split into free text and `#tag` filters. Free text selects
/// candidates through the index; without it every note is a candidate.
/// Candidates must satisfy every tag filter (a filter matches its tag and
/// all descendants). Results are ranked by [`score`], ties keeping
/// snapshot order, and truncated to `options.limit`. Text queries also get
/// a highlighted title and content snippet.
///
/// Index hits whose id is not in `notes` are skipped. A repeated id is
/// represented by its first note.
pub fn search_notes<I: NoteIndex + ?Sized>(
    index: &I,
    notes: &[Note],
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult> {
    let start = Instant::now();
    let parsed = ParsedQuery::parse(query);
    if parsed.is_empty() {
        return Vec::new();
    }

    let candidates: Vec<(&Note, BTreeSet<Field>)> = if parsed.has_text() {
        let mut position: HashMap<&NoteId, usize> = HashMap::with_capacity(notes.len());
        for (pos, note) in notes.iter().enumerate() {
            position.entry(note.id()).or_insert(pos);
        }
        let mut hits: Vec<(usize, BTreeSet<Field>)> = index
            .search(parsed.text(), index.len().max(notes.len()))
            .into_iter()
            .filter_map(|hit| {
                let pos = *position.get(hit.id())?;
                Some((pos, hit.matched_fields().clone()))
            })
            .collect();
        // Snapshot order, so ties rank the same however the index was built.
        hits.sort_by_key(|(pos, _)| *pos);
        hits.into_iter()
            .map(|(pos, fields)| (&notes[pos], fields))
            .collect()
    } else {
        let mut seen: HashSet<&NoteId> = HashSet::with_capacity(notes.len());
        notes
            .iter()
            .filter(|n| seen.insert(n.id()))
            .map(|n| (n, BTreeSet::new()))
            .collect()
    };
    let candidate_count = candidates.len();

    let text_lower = parsed.has_text().then(|| parsed.text().to_lowercase());
    let mut results: Vec<SearchResult> = candidates
        .into_iter()
        .filter(|(note, _)| {
            parsed
                .tags()
                .iter()
                .all(|filter| note.tags().iter().any(|t| filter.covers(t)))
        })
        .map(|(note, mut matched_fields)| {
            if !parsed.tags().is_empty() {
                matched_fields.insert(Field::Tags);
            }
            SearchResult {
                note: note.clone(),
                score: score(note, text_lower.as_deref(), parsed.tags().len()),
                highlighted_title: None,
                highlighted_content: None,
                matched_fields,
            }
        })
        .collect();

    // Stable: equal scores keep snapshot order.
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(options.limit);

    if parsed.has_text() {
        let highlighter = Highlighter::new(&parsed.words());
        for result in &mut results {
            result.highlighted_title = Some(highlighter.highlight(result.note.title()));
            result.highlighted_content = Some(
                highlighter.snippet(result.note.content(), options.snippet_length),
            );
        }
    }

    tracing::debug!(
        query,
        text = parsed.text(),
        tag_filters = parsed.tags().len(),
        candidates = candidate_count,
        results = results.len(),
        elapsed = ?start.elapsed(),
        "search"
    );
    results
}
