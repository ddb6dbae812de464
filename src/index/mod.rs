//! Lexical note index and incremental synchronization

mod memory;
mod repository;
mod sync;

pub use memory::{MemoryIndex, tokenize};
pub use repository::{Field, IndexHit, IndexedNote, NoteIndex};
pub use sync::{NoteDelta, SyncMode, SyncReport, compute_delta};
