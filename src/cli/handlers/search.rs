//! Search command handler.

use anyhow::Result;
use std::path::Path;

use super::load_notes;
use crate::cli::SearchArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::search::{SearchEngine, SearchResult, strip_marks};

pub fn handle_search(args: &SearchArgs, notes_file: &Path, config: &Config) -> Result<()> {
    let notes = load_notes(notes_file)?;
    let options = config.search_options(args.limit, args.snippet_length);

    let mut engine = SearchEngine::new();
    engine.sync(&notes);
    let results = engine.search(&args.query, &options);

    match args.format {
        OutputFormat::Human => print!("{}", format_results(&results)),
        OutputFormat::Json => Output::new(&results).print()?,
    }
    Ok(())
}

/// Renders results for the terminal, without emphasis markers.
fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No matching notes found.\n".to_string();
    }
    let mut out = String::new();
    for result in results {
        let note = result.note();
        out.push_str(&format!(
            "{} {} (score: {:.1})\n",
            note.id().prefix(),
            note.title(),
            result.score()
        ));
        if let Some(snippet) = result.highlighted_content().filter(|s| !s.is_empty()) {
            out.push_str(&format!("  {}\n", strip_marks(snippet)));
        }
    }
    out.push('\n');
    out.push_str(&format!("{} result(s)\n", results.len()));
    out
}
