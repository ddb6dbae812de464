//! Note record consumed by the tag tree and the search engine.

use crate::domain::{NoteId, TagPath};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A note as supplied by the caller.
///
/// The crate only ever reads notes; identity (`id`) is expected to stay
/// stable while title, content and tags change between snapshots.
///
/// # Examples
///
/// ```
/// use grove::domain::{Note, TagPath};
///
/// let note = Note::builder("n1".parse().unwrap(), "Meeting Notes")
///     .content("Discussed project timeline")
///     .tags(vec![TagPath::new("work").unwrap()])
///     .build();
/// assert_eq!(note.title(), "Meeting Notes");
/// assert!(note.has_tag("work"));
/// ```
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    tags: Vec<TagPath>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a builder for constructing a Note.
    pub fn builder(id: NoteId, title: impl Into<String>) -> NoteBuilder {
        NoteBuilder::new(id, title)
    }

    /// Returns the note's identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's body text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the note's tags.
    pub fn tags(&self) -> &[TagPath] {
        &self.tags
    }

    /// Returns when the note was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the note was last updated.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the note carries exactly this tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }

    /// Returns whether title, content or the tag set differ from `other`.
    ///
    /// Tags are compared as sets; timestamps are ignored.
    pub fn differs_from(&self, other: &Note) -> bool {
        if self.title != other.title || self.content != other.content {
            return true;
        }
        let mine: HashSet<&TagPath> = self.tags.iter().collect();
        let theirs: HashSet<&TagPath> = other.tags.iter().collect();
        mine != theirs
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("tags", &self.tags)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a Note with optional fields.
pub struct NoteBuilder {
    id: NoteId,
    title: String,
    content: String,
    tags: Vec<TagPath>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl NoteBuilder {
    fn new(id: NoteId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the note's body text.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the note's tags.
    ///
    /// Duplicates are removed (first occurrence kept).
    pub fn tags(mut self, tags: Vec<TagPath>) -> Self {
        self.tags = deduplicate_tags(tags);
        self
    }

    /// Sets the creation timestamp.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Sets the last-updated timestamp.
    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Builds the Note.
    ///
    /// Missing timestamps default to now; a missing `updated_at` falls back
    /// to `created_at`.
    pub fn build(self) -> Note {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Note {
            id: self.id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

/// Removes duplicate tags (first occurrence kept).
fn deduplicate_tags(tags: Vec<TagPath>) -> Vec<TagPath> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct NoteHelper {
            #[serde(default)]
            id: Option<NoteId>,
            #[serde(default)]
            title: Option<String>,
            #[serde(default)]
            content: Option<String>,
            #[serde(default)]
            tags: Option<Vec<Option<String>>>,
            #[serde(default)]
            created_at: Option<DateTime<Utc>>,
            #[serde(default)]
            updated_at: Option<DateTime<Utc>>,
        }

        let helper = NoteHelper::deserialize(deserializer)?;

        // Missing, null and blank tags degrade to "no tag" rather than failing the note.
        let tags = helper
            .tags
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|t| TagPath::new(&t).ok())
            .collect();

        let mut builder = Note::builder(
            helper.id.unwrap_or_default(),
            helper.title.unwrap_or_default(),
        )
        .content(helper.content.unwrap_or_default())
        .tags(tags);
        if let Some(at) = helper.created_at {
            builder = builder.created_at(at);
        }
        if let Some(at) = helper.updated_at {
            builder = builder.updated_at(at);
        }
        Ok(builder.build())
    }
}
