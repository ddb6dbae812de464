//! Loading note snapshots from JSON or YAML files.

use crate::domain::Note;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while loading a note snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("snapshot file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path: path.into() },
            _ => LoadError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Serialization format of a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Picks the format from the file extension; anything but `.yaml` /
    /// `.yml` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

/// A snapshot is either a bare list of notes or an object with a `notes` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    List(Vec<Note>),
    Wrapped { notes: Vec<Note> },
}

impl From<SnapshotDocument> for Vec<Note> {
    fn from(doc: SnapshotDocument) -> Self {
        match doc {
            SnapshotDocument::List(notes) | SnapshotDocument::Wrapped { notes } => notes,
        }
    }
}

/// Reads a note snapshot from `path`.
///
/// # Errors
///
/// Returns `LoadError::NotFound` if the file doesn't exist, `LoadError::Io`
/// for other read failures, and `LoadError::Json` / `LoadError::Yaml` if the
/// content cannot be parsed.
pub fn read_snapshot(path: &Path) -> Result<Vec<Note>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))?;
    let notes = parse_snapshot(&text, SnapshotFormat::from_path(path), path)?;
    tracing::debug!(path = %path.display(), notes = notes.len(), "loaded snapshot");
    Ok(notes)
}

/// Parses snapshot text. `path` is only used in error messages.
pub fn parse_snapshot(
    text: &str,
    format: SnapshotFormat,
    path: &Path,
) -> Result<Vec<Note>, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let doc: SnapshotDocument = match format {
        SnapshotFormat::Json => serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: path.into(),
            source,
        })?,
        SnapshotFormat::Yaml => serde_yaml::from_str(text).map_err(|source| LoadError::Yaml {
            path: path.into(),
            source,
        })?,
    };
    Ok(doc.into())
}
