//! grove - hierarchical tag trees and incremental search over notes

pub mod cli;
pub mod domain;
pub mod index;
pub mod infra;
pub mod logging;
pub mod search;
pub mod tags;

use anyhow::{Result, anyhow};
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_completions, handle_notes, handle_search, handle_sync, handle_tags, handle_tree,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    let config = Config::load()?;
    let notes_file = config.notes_file(cli.notes.as_ref());
    tracing::debug!(notes = %notes_file.display(), "resolved notes file");

    match &cli.command {
        Command::Tags(args) => handle_tags(args, &notes_file),
        Command::Tree(args) => handle_tree(args, &notes_file),
        Command::Notes(args) => handle_notes(args, &notes_file),
        Command::Search(args) => handle_search(args, &notes_file, &config),
        Command::Sync(args) => handle_sync(args, &notes_file),
        Command::Completions(args) => handle_completions(args),
    }
}
