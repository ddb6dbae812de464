//! Tag aggregation, the hierarchical tag tree, and tag-hierarchy filtering.

mod count;
mod tree;

pub use count::{TagCount, aggregate_tags};
pub use tree::{TagTreeNode, TreeWalk, build_tag_tree, find_node, walk};

use crate::domain::{Note, TAG_SEPARATOR, TagPath};

/// Returns whether `note_tag` is `filter_tag` or one of its descendants.
///
/// Matching respects segment boundaries: `work` matches `work` and
/// `work/x` but not `working`.
pub fn is_tag_or_parent(filter_tag: &str, note_tag: &str) -> bool {
    match note_tag.strip_prefix(filter_tag) {
        Some(rest) => rest.is_empty() || rest.starts_with(TAG_SEPARATOR),
        None => false,
    }
}

/// Returns the notes tagged with `tag_path` or any descendant of it, in
/// input order.
///
/// The filter is normalized like any other tag (`work/` selects `work`);
/// a blank filter selects nothing.
pub fn get_notes_for_tag<'a>(tag_path: &str, notes: &'a [Note]) -> Vec<&'a Note> {
    let Ok(filter) = TagPath::new(tag_path) else {
        return Vec::new();
    };
    notes
        .iter()
        .filter(|note| note.tags().iter().any(|t| filter.covers(t)))
        .collect()
}
