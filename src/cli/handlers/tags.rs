//! Tag command handlers (tags, tree, notes).

use anyhow::{Context, Result};
use std::path::Path;

use super::{load_notes, truncate_str};
use crate::cli::output::{NoteListing, Output, OutputFormat, TagListing};
use crate::cli::{NotesArgs, TagsArgs, TreeArgs};
use crate::domain::{Note, TagPath};
use crate::tags::{TagCount, TagTreeNode, aggregate_tags, build_tag_tree, get_notes_for_tag, walk};

const TITLE_WIDTH: usize = 60;

pub fn handle_tags(args: &TagsArgs, notes_file: &Path) -> Result<()> {
    let notes = load_notes(notes_file)?;
    let tags = aggregate_tags(&notes);

    match args.format {
        OutputFormat::Human => print!("{}", format_tags(&tags, args.counts)),
        OutputFormat::Json => {
            let listings: Vec<TagListing> = tags
                .iter()
                .map(|t| TagListing {
                    name: t.name().to_string(),
                    count: args.counts.then_some(t.note_count()),
                })
                .collect();
            Output::new(listings).print()?;
        }
    }
    Ok(())
}

pub fn handle_tree(args: &TreeArgs, notes_file: &Path) -> Result<()> {
    let notes = load_notes(notes_file)?;
    let tree = build_tag_tree(&aggregate_tags(&notes));

    match args.format {
        OutputFormat::Human => print!("{}", format_tree(&tree)),
        OutputFormat::Json => Output::new(&tree).print()?,
    }
    Ok(())
}

pub fn handle_notes(args: &NotesArgs, notes_file: &Path) -> Result<()> {
    // Validate tag first (before any I/O)
    TagPath::new(&args.tag).with_context(|| format!("invalid tag '{}'", args.tag))?;

    let notes = load_notes(notes_file)?;
    let matching = get_notes_for_tag(&args.tag, &notes);

    match args.format {
        OutputFormat::Human => print!("{}", format_notes(&matching)),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = matching.iter().map(|n| note_listing(n)).collect();
            Output::new(listings).print()?;
        }
    }
    Ok(())
}

pub(crate) fn note_listing(note: &Note) -> NoteListing {
    NoteListing {
        id: note.id().to_string(),
        title: note.title().to_string(),
        tags: note.tags().iter().map(ToString::to_string).collect(),
    }
}

fn format_tags(tags: &[TagCount], counts: bool) -> String {
    if tags.is_empty() {
        return "No tags found.\n".to_string();
    }
    let mut out = String::new();
    for t in tags {
        if counts {
            out.push_str(&format!("{} ({})\n", t.name(), t.note_count()));
        } else {
            out.push_str(&format!("{}\n", t.name()));
        }
    }
    out
}

fn format_tree(roots: &[TagTreeNode]) -> String {
    if roots.is_empty() {
        return "No tags found.\n".to_string();
    }
    let mut out = String::new();
    for (depth, node) in walk(roots) {
        let indent = "  ".repeat(depth);
        if node.is_placeholder() {
            out.push_str(&format!("{indent}{}\n", node.name()));
        } else {
            out.push_str(&format!("{indent}{} ({})\n", node.name(), node.note_count()));
        }
    }
    out
}

fn format_notes(notes: &[&Note]) -> String {
    if notes.is_empty() {
        return "No matching notes found.\n".to_string();
    }
    let mut out = String::new();
    for note in notes {
        out.push_str(&format!(
            "{} {}\n",
            note.id().prefix(),
            truncate_str(note.title(), TITLE_WIDTH)
        ));
    }
    out
}
