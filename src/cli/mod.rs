//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// grove - hierarchical tags and search over a notes snapshot
#[derive(Parser, Debug)]
#[command(name = "grove", version, about, long_about = None)]
pub struct Cli {
    /// Notes snapshot file, JSON or YAML (overrides config file)
    #[arg(short = 'n', long, global = true)]
    pub notes: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all tags
    Tags(TagsArgs),

    /// Show the tag hierarchy
    Tree(TreeArgs),

    /// List notes under a tag, including its descendants
    Notes(NotesArgs),

    /// Search notes by text and #tag filters
    Search(SearchArgs),

    /// Show what changed since a previous snapshot
    Sync(SyncArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Show note counts for each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tree` command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `notes` command
#[derive(Parser, Debug)]
pub struct NotesArgs {
    /// Tag path, e.g. `work/projects`
    pub tag: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query; `#tag` tokens filter by tag
    pub query: String,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Approximate snippet length in characters
    #[arg(long)]
    pub snippet_length: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `sync` command
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Previous snapshot file to diff against
    pub previous: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
