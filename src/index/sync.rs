//! Snapshot diffing for incremental index synchronization.

use crate::domain::{Note, NoteId};
use crate::index::NoteIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// The index operations needed to move from one note snapshot to another.
#[derive(Debug, Default)]
pub struct NoteDelta<'a> {
    /// Notes present now but not before.
    pub added: Vec<&'a Note>,
    /// Notes whose title, content or tag set changed.
    pub updated: Vec<&'a Note>,
    /// Ids present before but not now.
    pub removed: Vec<NoteId>,
}

impl NoteDelta<'_> {
    /// Returns whether the snapshots are equivalent for indexing purposes.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Returns the total number of index operations in the delta.
    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }

    /// Applies the delta to `index`: removals first, then updates, then
    /// additions.
    pub fn apply<I: NoteIndex + ?Sized>(&self, index: &mut I) {
        for id in &self.removed {
            index.remove(id);
        }
        for note in &self.updated {
            index.update(note);
        }
        for note in &self.added {
            index.add(note);
        }
    }
}

/// Computes the minimal delta between two snapshots.
///
/// Notes are matched by id. A note counts as updated only when its title,
/// content or tag set (order-insensitive) differs; timestamp-only changes
/// are ignored. If either snapshot lists an id twice, the first occurrence
/// wins, matching [`NoteIndex::rebuild`].
pub fn compute_delta<'a>(previous: &[Note], current: &'a [Note]) -> NoteDelta<'a> {
    let mut before: HashMap<&NoteId, &Note> = HashMap::with_capacity(previous.len());
    for note in previous {
        before.entry(note.id()).or_insert(note);
    }
    let mut seen: HashSet<&NoteId> = HashSet::with_capacity(current.len());
    let mut delta = NoteDelta::default();

    for note in current {
        if !seen.insert(note.id()) {
            continue;
        }
        match before.get(note.id()) {
            None => delta.added.push(note),
            Some(old) if old.differs_from(note) => delta.updated.push(note),
            Some(_) => {}
        }
    }

    let mut removed_seen = HashSet::new();
    for note in previous {
        if !seen.contains(note.id()) && removed_seen.insert(note.id()) {
            delta.removed.push(note.id().clone());
        }
    }

    delta
}

/// How a synchronization pass was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// The index was rebuilt from the full snapshot.
    Rebuild,
    /// Only the delta against the previous snapshot was applied.
    Incremental,
}

/// Result of synchronizing an index with a note snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub mode: SyncMode,
    /// Notes newly indexed (all notes, for a rebuild).
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    /// Notes left untouched.
    pub unchanged: usize,
}

impl SyncReport {
    /// Report for a full rebuild over `indexed` notes.
    pub fn rebuild(indexed: usize) -> Self {
        Self {
            mode: SyncMode::Rebuild,
            added: indexed,
            updated: 0,
            removed: 0,
            unchanged: 0,
        }
    }

    /// Report for an incremental pass that applied `delta` to a snapshot of
    /// `current_len` distinct notes.
    pub fn incremental(delta: &NoteDelta<'_>, current_len: usize) -> Self {
        Self {
            mode: SyncMode::Incremental,
            added: delta.added.len(),
            updated: delta.updated.len(),
            removed: delta.removed.len(),
            unchanged: current_len.saturating_sub(delta.added.len() + delta.updated.len()),
        }
    }
}
