//! Sync command handler: diff two snapshots the way the index sees them.

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

use super::load_notes;
use crate::cli::SyncArgs;
use crate::cli::output::{DeltaListing, Output, OutputFormat};
use crate::index::{NoteDelta, SyncReport, compute_delta};

pub fn handle_sync(args: &SyncArgs, notes_file: &Path) -> Result<()> {
    let previous = load_notes(&args.previous)?;
    let current = load_notes(notes_file)?;

    let delta = compute_delta(&previous, &current);
    let distinct: HashSet<_> = current.iter().map(|n| n.id()).collect();
    let report = SyncReport::incremental(&delta, distinct.len());
    tracing::info!(
        added = report.added,
        updated = report.updated,
        removed = report.removed,
        unchanged = report.unchanged,
        "computed snapshot delta"
    );

    let listing = delta_listing(&delta, report.unchanged);
    match args.format {
        OutputFormat::Human => print!("{}", format_delta(&listing)),
        OutputFormat::Json => Output::new(&listing).print()?,
    }
    Ok(())
}

fn delta_listing(delta: &NoteDelta<'_>, unchanged: usize) -> DeltaListing {
    DeltaListing {
        added: delta.added.iter().map(|n| n.id().to_string()).collect(),
        updated: delta.updated.iter().map(|n| n.id().to_string()).collect(),
        removed: delta.removed.iter().map(ToString::to_string).collect(),
        unchanged,
    }
}

fn format_delta(listing: &DeltaListing) -> String {
    let mut out = String::new();
    for id in &listing.added {
        out.push_str(&format!("+ {id}\n"));
    }
    for id in &listing.updated {
        out.push_str(&format!("~ {id}\n"));
    }
    for id in &listing.removed {
        out.push_str(&format!("- {id}\n"));
    }
    out.push_str(&format!(
        "{} added, {} updated, {} removed, {} unchanged\n",
        listing.added.len(),
        listing.updated.len(),
        listing.removed.len(),
        listing.unchanged
    ));
    out
}
