//! Fluent wrapper around assert_cmd::Command.

// Shared across test binaries that each use a subset of it
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `grove` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct GroveCommand {
    args: Vec<String>,
    config_home: Option<PathBuf>,
}

impl GroveCommand {
    /// Creates a new command for the `grove` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config_home: None,
        }
    }

    /// Sets the `--notes` option to specify the snapshot file.
    pub fn notes(mut self, path: &Path) -> Self {
        self.args.push("--notes".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points the config lookup at `dir` instead of the user's home.
    pub fn config_home(mut self, dir: &Path) -> Self {
        self.config_home = Some(dir.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("grove").expect("Failed to find grove binary");
        cmd.env_remove("GROVE_LOG");
        if let Some(home) = &self.config_home {
            cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `tags` command.
    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    /// Configures for the `tree` command.
    pub fn tree(self) -> Self {
        self.args(["tree"])
    }

    /// Configures for the `notes` command with a tag.
    pub fn notes_for(self, tag: &str) -> Self {
        self.args(["notes", tag])
    }

    /// Configures for the `search` command with a query.
    pub fn search(self, query: &str) -> Self {
        self.args(["search", query])
    }

    /// Configures for the `sync` command against a previous snapshot.
    pub fn sync(self, previous: &Path) -> Self {
        self.args(["sync".to_string(), previous.to_string_lossy().to_string()])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for GroveCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ===========================================
    // GroveCommand Basics
    // ===========================================

    #[test]
    fn test_command_runs_binary() {
        GroveCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_notes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.json");
        let cmd = GroveCommand::new().notes(&path);
        let args = cmd.get_args();
        assert_eq!(args[0], "--notes");
        assert_eq!(args[1], path.to_string_lossy());
    }

    #[test]
    fn test_command_output_success() {
        let output = GroveCommand::new().args(["--help"]).output_success();
        assert!(output.contains("grove"));
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = GroveCommand::new().tags().format_json();
        let args = cmd.get_args();
        assert!(args.contains(&"tags".to_string()));
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }
}
