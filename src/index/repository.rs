//! NoteIndex trait and result types.

use crate::domain::{Note, NoteId, TagPath};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

// ===========================================
// Field
// ===========================================

/// A searchable part of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
    /// Set on combined-query results selected through `#tag` filters.
    Tags,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Content => write!(f, "content"),
            Field::Tags => write!(f, "tags"),
        }
    }
}

// ===========================================
// IndexedNote
// ===========================================

/// The projection of a note held by the index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedNote {
    id: NoteId,
    title: String,
    content: String,
    tags: Vec<TagPath>,
    updated_at: DateTime<Utc>,
}

impl IndexedNote {
    /// Returns the note's identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the indexed title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the indexed content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the tags at the time of indexing.
    pub fn tags(&self) -> &[TagPath] {
        &self.tags
    }

    /// Returns the note's last update time at the time of indexing.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl From<&Note> for IndexedNote {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().clone(),
            title: note.title().to_string(),
            content: note.content().to_string(),
            tags: note.tags().to_vec(),
            updated_at: note.updated_at(),
        }
    }
}

// ===========================================
// IndexHit
// ===========================================

/// A single note matched by a lexical index search.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    note: IndexedNote,
    matched_fields: BTreeSet<Field>,
}

impl IndexHit {
    /// Creates a new IndexHit.
    pub fn new(note: IndexedNote, matched_fields: BTreeSet<Field>) -> Self {
        Self {
            note,
            matched_fields,
        }
    }

    /// Returns the id of the matched note.
    pub fn id(&self) -> &NoteId {
        self.note.id()
    }

    /// Returns the stored projection of the matched note.
    pub fn note(&self) -> &IndexedNote {
        &self.note
    }

    /// Returns which fields matched the query.
    pub fn matched_fields(&self) -> &BTreeSet<Field> {
        &self.matched_fields
    }
}

// ===========================================
// NoteIndex Trait
// ===========================================

/// A lexical index over note titles and content.
///
/// Every operation is infallible: removing an absent id is a no-op and a
/// query that cannot match anything returns no hits.
pub trait NoteIndex {
    /// Inserts a projection of the note.
    ///
    /// Callers should use [`NoteIndex::update`] for notes that may already
    /// be present; adding an id twice is implementation-defined.
    fn add(&mut self, note: &Note);

    /// Removes the entry for `id`, returning whether one existed.
    fn remove(&mut self, id: &NoteId) -> bool;

    /// Removes all entries.
    fn clear(&mut self);

    /// Searches titles and content, returning at most `limit` hits.
    ///
    /// A blank query returns no hits. A note matching in both fields
    /// appears once with both fields recorded.
    fn search(&self, query: &str, limit: usize) -> Vec<IndexHit>;

    /// Returns whether an entry for `id` exists.
    fn contains(&self, id: &NoteId) -> bool;

    /// Returns the number of indexed notes.
    fn len(&self) -> usize;

    /// Returns whether the index holds no notes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the entry for the note, whether or not it existed.
    fn update(&mut self, note: &Note) {
        self.remove(note.id());
        self.add(note);
    }

    /// Discards all entries and indexes `notes` from scratch.
    ///
    /// When an id repeats, the first note carrying it is indexed.
    fn rebuild(&mut self, notes: &[Note]) {
        self.clear();
        for note in notes {
            if !self.contains(note.id()) {
                self.add(note);
            }
        }
    }
}
