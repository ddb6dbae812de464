//! Command handlers for the CLI.

mod search;
mod sync;
mod tags;

use anyhow::{Context, Result};
use clap::CommandFactory;
use std::path::Path;

use crate::cli::{Cli, CompletionsArgs};
use crate::domain::Note;
use crate::infra::read_snapshot;

pub use search::handle_search;
pub use sync::handle_sync;
pub use tags::{handle_notes, handle_tags, handle_tree};

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

// ===========================================
// Shared Utilities
// ===========================================

/// Loads the notes snapshot a command operates on.
pub(crate) fn load_notes(notes_file: &Path) -> Result<Vec<Note>> {
    read_snapshot(notes_file)
        .with_context(|| format!("failed to load notes from {}", notes_file.display()))
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
