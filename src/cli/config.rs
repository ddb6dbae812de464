//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::search::{DEFAULT_LIMIT, DEFAULT_SNIPPET_LENGTH, SearchOptions};

/// Snapshot file used when neither `--notes` nor the config names one.
pub const DEFAULT_NOTES_FILE: &str = "notes.json";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default notes snapshot file
    pub notes: Option<PathBuf>,

    /// Search defaults
    pub search: SearchConfig,
}

/// The `[search]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default result limit
    pub limit: Option<usize>,

    /// Default snippet length in characters
    pub snippet_length: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `config_path`, defaulting if it's absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/grove/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grove")
            .join("config.toml")
    }

    /// Resolve the snapshot file, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--notes` argument
    /// 2. Config file `notes` setting
    /// 3. `notes.json` in the current directory
    pub fn notes_file(&self, cli_notes: Option<&PathBuf>) -> PathBuf {
        cli_notes
            .cloned()
            .or_else(|| self.notes.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTES_FILE))
    }

    /// Resolve search options from CLI overrides, then config, then defaults.
    pub fn search_options(
        &self,
        limit: Option<usize>,
        snippet_length: Option<usize>,
    ) -> SearchOptions {
        SearchOptions::default()
            .with_limit(limit.or(self.search.limit).unwrap_or(DEFAULT_LIMIT))
            .with_snippet_length(
                snippet_length
                    .or(self.search.snippet_length)
                    .unwrap_or(DEFAULT_SNIPPET_LENGTH),
            )
    }
}
