//! Stateful search engine that keeps an index in step with note snapshots.

use crate::domain::Note;
use crate::index::{MemoryIndex, NoteIndex, SyncReport, compute_delta};
use crate::search::{SearchOptions, SearchResult, search_notes};

/// Owns a [`NoteIndex`] and the last snapshot it was synchronized with.
///
/// The first [`sync`](SearchEngine::sync) after construction or
/// [`reset`](SearchEngine::reset) rebuilds the index from scratch; later
/// calls apply only the delta against the previous snapshot.
///
/// # Examples
///
/// ```
/// use grove::domain::Note;
/// use grove::index::SyncMode;
/// use grove::search::{SearchEngine, SearchOptions};
///
/// let mut engine = SearchEngine::new();
/// let notes = vec![Note::builder("1".parse().unwrap(), "Project Ideas").build()];
///
/// assert_eq!(engine.sync(&notes).mode, SyncMode::Rebuild);
/// assert_eq!(engine.sync(&notes).mode, SyncMode::Incremental);
///
/// let results = engine.search("proj", &SearchOptions::default());
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug)]
pub struct SearchEngine<I: NoteIndex = MemoryIndex> {
    index: I,
    snapshot: Option<Vec<Note>>,
}

impl SearchEngine<MemoryIndex> {
    /// Creates an engine with a fresh in-memory index.
    pub fn new() -> Self {
        Self::with_index(MemoryIndex::new())
    }
}

impl Default for SearchEngine<MemoryIndex> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: NoteIndex> SearchEngine<I> {
    /// Creates an engine around an existing index.
    ///
    /// Whatever the index already holds is discarded by the first sync.
    pub fn with_index(index: I) -> Self {
        Self {
            index,
            snapshot: None,
        }
    }

    /// Returns the underlying index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Returns the snapshot from the last sync (empty before the first).
    pub fn notes(&self) -> &[Note] {
        self.snapshot.as_deref().unwrap_or_default()
    }

    /// Returns whether a snapshot has been recorded since creation or reset.
    pub fn is_synced(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Brings the index in line with `notes`.
    pub fn sync(&mut self, notes: &[Note]) -> SyncReport {
        let report = match &self.snapshot {
            None => {
                self.index.rebuild(notes);
                SyncReport::rebuild(self.index.len())
            }
            Some(previous) => {
                let delta = compute_delta(previous, notes);
                delta.apply(&mut self.index);
                SyncReport::incremental(&delta, self.index.len())
            }
        };
        tracing::debug!(
            mode = ?report.mode,
            added = report.added,
            updated = report.updated,
            removed = report.removed,
            "synchronized search index"
        );
        self.snapshot = Some(notes.to_vec());
        report
    }

    /// Rebuilds the index from `notes`, ignoring any previous snapshot.
    pub fn rebuild(&mut self, notes: &[Note]) -> SyncReport {
        self.snapshot = None;
        self.sync(notes)
    }

    /// Clears the index and forgets the snapshot.
    pub fn reset(&mut self) {
        self.index.clear();
        self.snapshot = None;
    }

    /// Runs a combined query against the last synchronized snapshot.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        search_notes(&self.index, self.notes(), query, options)
    }
}
