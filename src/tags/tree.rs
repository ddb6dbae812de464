//! Hierarchical tag tree assembled from flat tag counts.

use crate::domain::TagPath;
use crate::tags::TagCount;
use serde::Serialize;
use std::collections::HashMap;

/// A node in the tag tree.
///
/// Siblings (including the root list) are ordered by `full_path` using
/// ordinal byte comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagTreeNode {
    name: String,
    full_path: TagPath,
    note_count: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    placeholder: bool,
    children: Vec<TagTreeNode>,
}

impl TagTreeNode {
    /// Returns the leaf segment of this node's path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full tag path of this node.
    pub fn full_path(&self) -> &TagPath {
        &self.full_path
    }

    /// Returns the number of notes tagged with exactly this path.
    pub fn note_count(&self) -> usize {
        self.note_count
    }

    /// Returns whether this node was synthesized to connect a deeper tag
    /// to the tree, with no tag count of its own.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Returns the child nodes.
    pub fn children(&self) -> &[TagTreeNode] {
        &self.children
    }
}

/// Working representation while the tree is assembled: nodes live in an
/// arena and refer to their children by index.
struct Slot {
    path: TagPath,
    note_count: usize,
    placeholder: bool,
    children: Vec<usize>,
}

/// Builds the tag tree from flat tag counts.
///
/// Every input tag becomes exactly one node. Missing ancestors are
/// synthesized as placeholder nodes with a zero count; if the real tag for
/// such an ancestor arrives later its count replaces the placeholder's.
/// The result does not depend on input order.
pub fn build_tag_tree(tag_counts: &[TagCount]) -> Vec<TagTreeNode> {
    let mut sorted: Vec<&TagCount> = tag_counts.iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));

    let mut slots: Vec<Slot> = Vec::new();
    let mut lookup: HashMap<String, usize> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();

    for tag_count in sorted {
        let path = tag_count.name();

        // Walk ancestors shallowest-first, creating whatever is missing.
        let mut parent: Option<usize> = None;
        for ancestor in path.ancestor_paths() {
            let idx = match lookup.get(ancestor) {
                Some(&idx) => idx,
                None => {
                    let idx = push_slot(
                        &mut slots,
                        &mut roots,
                        parent,
                        TagPath::from_normalized(ancestor),
                        0,
                        true,
                    );
                    lookup.insert(ancestor.to_string(), idx);
                    idx
                }
            };
            parent = Some(idx);
        }

        match lookup.get(path.as_str()) {
            Some(&idx) => {
                let slot = &mut slots[idx];
                if slot.placeholder {
                    slot.placeholder = false;
                    slot.note_count = tag_count.note_count();
                } else {
                    slot.note_count += tag_count.note_count();
                }
            }
            None => {
                let idx = push_slot(
                    &mut slots,
                    &mut roots,
                    parent,
                    path.clone(),
                    tag_count.note_count(),
                    false,
                );
                lookup.insert(path.as_str().to_string(), idx);
            }
        }
    }

    tracing::trace!(
        tags = tag_counts.len(),
        nodes = slots.len(),
        roots = roots.len(),
        "built tag tree"
    );

    let mut nodes: Vec<TagTreeNode> = roots.iter().map(|&idx| assemble(&slots, idx)).collect();
    sort_siblings(&mut nodes);
    nodes
}

fn push_slot(
    slots: &mut Vec<Slot>,
    roots: &mut Vec<usize>,
    parent: Option<usize>,
    path: TagPath,
    note_count: usize,
    placeholder: bool,
) -> usize {
    let idx = slots.len();
    slots.push(Slot {
        path,
        note_count,
        placeholder,
        children: Vec::new(),
    });
    match parent {
        Some(parent) => slots[parent].children.push(idx),
        None => roots.push(idx),
    }
    idx
}

fn assemble(slots: &[Slot], idx: usize) -> TagTreeNode {
    let slot = &slots[idx];
    let mut children: Vec<TagTreeNode> = slot
        .children
        .iter()
        .map(|&child| assemble(slots, child))
        .collect();
    sort_siblings(&mut children);

    TagTreeNode {
        name: slot.path.name().to_string(),
        full_path: slot.path.clone(),
        note_count: slot.note_count,
        placeholder: slot.placeholder,
        children,
    }
}

fn sort_siblings(nodes: &mut [TagTreeNode]) {
    nodes.sort_by(|a, b| a.full_path.cmp(&b.full_path));
}

/// Finds the node for `path` anywhere in the tree.
pub fn find_node<'a>(roots: &'a [TagTreeNode], path: &str) -> Option<&'a TagTreeNode> {
    let mut level = roots;
    let mut prefix_len = 0;
    loop {
        let node = level.iter().find(|n| {
            let full = n.full_path.as_str();
            path.starts_with(full)
                && full.len() > prefix_len
                && (path.len() == full.len() || path[full.len()..].starts_with('/'))
        })?;
        if node.full_path.as_str().len() == path.len() {
            return Some(node);
        }
        prefix_len = node.full_path.as_str().len();
        level = &node.children;
    }
}

/// Pre-order, depth-first walk over the tree yielding `(depth, node)`,
/// where root nodes have depth 0.
pub fn walk(roots: &[TagTreeNode]) -> TreeWalk<'_> {
    TreeWalk {
        stack: roots.iter().rev().map(|n| (0, n)).collect(),
    }
}

/// Iterator returned by [`walk`].
pub struct TreeWalk<'a> {
    stack: Vec<(usize, &'a TagTreeNode)>,
}

impl<'a> Iterator for TreeWalk<'a> {
    type Item = (usize, &'a TagTreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Note;
    use crate::tags::aggregate_tags;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn tc(name: &str, count: usize) -> TagCount {
        TagCount::new(TagPath::new(name).unwrap(), count)
    }

    fn note(id: &str, tags: &[&str]) -> Note {
        Note::builder(id.parse().unwrap(), id)
            .tags(tags.iter().map(|t| TagPath::new(t).unwrap()).collect())
            .build()
    }

    fn flatten(roots: &[TagTreeNode]) -> Vec<(usize, &str, usize)> {
        walk(roots)
            .map(|(depth, n)| (depth, n.full_path().as_str(), n.note_count()))
            .collect()
    }

    // ===========================================
    // Basic Shapes
    // ===========================================

    #[test]
    fn empty_input_yields_empty_tree() {
        assert!(build_tag_tree(&[]).is_empty());
    }

    #[test]
    fn flat_tags_are_sorted_roots() {
        let tree = build_tag_tree(&[tc("work", 2), tc("personal", 1)]);
        assert_eq!(
            flatten(&tree),
            vec![(0, "personal", 1), (0, "work", 2)]
        );
        assert!(tree.iter().all(|n| n.children().is_empty()));
    }

    #[test]
    fn node_name_is_leaf_segment() {
        let tree = build_tag_tree(&[tc("work/ideas", 1)]);
        let ideas = &tree[0].children()[0];
        assert_eq!(ideas.name(), "ideas");
        assert_eq!(ideas.full_path().as_str(), "work/ideas");
    }

    // ===========================================
    // Ancestor Synthesis
    // ===========================================

    #[test]
    fn synthesizes_missing_ancestors() {
        let tree = build_tag_tree(&[tc("a/b/c", 1)]);
        assert_eq!(
            flatten(&tree),
            vec![(0, "a", 0), (1, "a/b", 0), (2, "a/b/c", 1)]
        );
        assert!(tree[0].is_placeholder());
        assert!(tree[0].children()[0].is_placeholder());
        assert!(!tree[0].children()[0].children()[0].is_placeholder());
    }

    #[test]
    fn real_parent_is_not_duplicated_or_zeroed() {
        let notes = vec![note("1", &["work"]), note("2", &["work/projects"])];
        let tree = build_tag_tree(&aggregate_tags(&notes));
        assert_eq!(
            flatten(&tree),
            vec![(0, "work", 1), (1, "work/projects", 1)]
        );
        assert!(!tree[0].is_placeholder());
    }

    #[test]
    fn real_entry_replaces_placeholder_regardless_of_order() {
        // Child first: the parent is synthesized, then the real parent arrives.
        let counts = [tc("work/projects", 1), tc("work", 4)];
        let mut reversed = counts.clone();
        reversed.reverse();

        for input in [&counts[..], &reversed[..]] {
            let tree = build_tag_tree(input);
            assert_eq!(
                flatten(&tree),
                vec![(0, "work", 4), (1, "work/projects", 1)]
            );
        }
    }

    #[test]
    fn shared_placeholder_is_reused() {
        let tree = build_tag_tree(&[tc("a/b/x", 1), tc("a/b/y", 2), tc("a/c", 3)]);
        assert_eq!(
            flatten(&tree),
            vec![
                (0, "a", 0),
                (1, "a/b", 0),
                (2, "a/b/x", 1),
                (2, "a/b/y", 2),
                (1, "a/c", 3),
            ]
        );
    }

    #[test]
    fn siblings_use_ordinal_path_order() {
        let tree = build_tag_tree(&[tc("b", 1), tc("B", 1), tc("a-b", 1), tc("a", 1), tc("a/b", 1)]);
        let roots: Vec<_> = tree.iter().map(|n| n.full_path().as_str()).collect();
        assert_eq!(roots, vec!["B", "a", "a-b", "b"]);
    }

    #[test]
    fn duplicate_input_entries_are_summed() {
        let tree = build_tag_tree(&[tc("work", 1), tc("work", 2)]);
        assert_eq!(flatten(&tree), vec![(0, "work", 3)]);
    }

    // ===========================================
    // Completeness
    // ===========================================

    #[test]
    fn every_tag_appears_exactly_once() {
        let notes = vec![
            note("1", &["work/projects/alpha", "personal"]),
            note("2", &["work", "work/projects/beta"]),
            note("3", &["reading/books/fiction", "reading"]),
            note("4", &["work/projects/alpha"]),
        ];
        let tree = build_tag_tree(&aggregate_tags(&notes));

        let paths: Vec<&str> = walk(&tree).map(|(_, n)| n.full_path().as_str()).collect();
        let unique: HashSet<&str> = paths.iter().copied().collect();
        assert_eq!(paths.len(), unique.len(), "no duplicate full paths");

        for n in &notes {
            for t in n.tags() {
                assert!(unique.contains(t.as_str()), "missing {}", t);
            }
        }
    }

    #[test]
    fn children_paths_extend_parent_path() {
        let tree = build_tag_tree(&[tc("a/b/c", 1), tc("a/d", 1), tc("e/f", 1)]);
        for (_, node) in walk(&tree) {
            for child in node.children() {
                assert_eq!(child.full_path().parent().as_ref(), Some(node.full_path()));
            }
        }
    }

    // ===========================================
    // Lookup
    // ===========================================

    #[test]
    fn find_node_locates_nested_and_rejects_prefix_collisions() {
        let tree = build_tag_tree(&[tc("work/ideas", 1), tc("working", 1)]);
        assert_eq!(
            find_node(&tree, "work/ideas").map(|n| n.note_count()),
            Some(1)
        );
        assert!(find_node(&tree, "work").is_some_and(TagTreeNode::is_placeholder));
        assert!(find_node(&tree, "working").is_some());
        assert!(find_node(&tree, "work/idea").is_none());
        assert!(find_node(&tree, "nope").is_none());
    }

    #[test]
    fn placeholder_flag_only_serialized_when_set() {
        let tree = build_tag_tree(&[tc("a/b", 1)]);
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value[0]["placeholder"], true);
        assert_eq!(value[0]["fullPath"], "a");
        assert!(value[0]["children"][0].get("placeholder").is_none());
        assert_eq!(value[0]["children"][0]["noteCount"], 1);
    }
}
