//! Builder for test notes with sensible defaults.

// Shared across test binaries that each use a subset of it
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use grove::domain::{Note, NoteId, TagPath};

/// Builder for creating test notes with sensible defaults.
///
/// Automatically generates an ID and timestamps, with a fluent API
/// for setting optional fields.
#[derive(Debug, Clone)]
pub struct TestNote {
    id: NoteId,
    title: String,
    content: String,
    tags: Vec<TagPath>,
    created: DateTime<Utc>,
}

impl TestNote {
    /// Creates a new test note with the given title.
    ///
    /// Automatically generates a unique ID and sets timestamps to now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: NoteId::new(),
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into().parse().expect("Invalid NoteId");
        self
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl AsRef<str>) -> Self {
        self.tags
            .push(TagPath::new(tag.as_ref()).expect("Invalid tag"));
        self
    }

    /// Sets the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ID.
    pub fn note_id(&self) -> &NoteId {
        &self.id
    }

    /// Converts this TestNote to a domain Note.
    pub fn to_note(&self) -> Note {
        Note::builder(self.id.clone(), &self.title)
            .content(&self.content)
            .tags(self.tags.clone())
            .created_at(self.created)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // TestNote Builder
    // ===========================================

    #[test]
    fn test_note_new_with_title() {
        let note = TestNote::new("My Test Note");
        assert_eq!(note.title(), "My Test Note");
    }

    #[test]
    fn test_note_generates_id() {
        let note = TestNote::new("Test");
        let id_str = note.note_id().to_string();
        assert_eq!(id_str.len(), 26, "Should generate a valid ULID");
    }

    #[test]
    fn test_note_builder_fluent() {
        let note = TestNote::new("Architecture Decisions")
            .tag("software/architecture")
            .tag("adr")
            .content("We chose Rust.");

        let domain_note = note.to_note();
        assert_eq!(domain_note.title(), "Architecture Decisions");
        assert_eq!(domain_note.content(), "We chose Rust.");
        assert_eq!(domain_note.tags().len(), 2);
        assert_eq!(domain_note.tags()[0].as_str(), "software/architecture");
    }

    #[test]
    fn test_note_custom_id() {
        let note = TestNote::new("Test").id("01HQ3K5M7NXJK4QZPW8V2R6T9Y");
        assert_eq!(note.note_id().to_string(), "01HQ3K5M7NXJK4QZPW8V2R6T9Y");
    }
}
