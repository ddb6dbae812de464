//! Flat tag aggregation over a note snapshot.

use crate::domain::{Note, TagPath};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A tag with the number of notes carrying exactly that tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    name: TagPath,
    note_count: usize,
}

impl TagCount {
    /// Creates a new TagCount.
    pub fn new(name: TagPath, note_count: usize) -> Self {
        Self { name, note_count }
    }

    /// Returns the full tag path.
    pub fn name(&self) -> &TagPath {
        &self.name
    }

    /// Returns the number of notes tagged with exactly this path.
    ///
    /// Notes tagged only with a descendant are not counted.
    pub fn note_count(&self) -> usize {
        self.note_count
    }
}

/// Counts, for every distinct tag, how many notes carry it.
///
/// A note listing the same tag twice is counted once. The result is sorted
/// by tag path (ordinal).
pub fn aggregate_tags(notes: &[Note]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&TagPath, usize> = BTreeMap::new();

    for note in notes {
        let mut seen = HashSet::new();
        for tag in note.tags() {
            if seen.insert(tag) {
                *counts.entry(tag).or_default() += 1;
            }
        }
    }

    counts
        .into_iter()
        .map(|(name, count)| TagCount::new(name.clone(), count))
        .collect()
}
