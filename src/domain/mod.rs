//! Core types: Note, NoteId, TagPath

mod note;
mod note_id;
mod tag;

pub use note::{Note, NoteBuilder};
pub use note_id::{NoteId, ParseNoteIdError};
pub use tag::{ParseTagPathError, TAG_SEPARATOR, TagPath};
