//! Isolated test environment with temp directory.

// Shared across test binaries that each use a subset of it
#![allow(dead_code)]

use super::{GroveCommand, TestNote};
use grove::domain::Note;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Default snapshot file name inside the environment.
const NOTES_FILE: &str = "notes.json";

/// Isolated test environment with a temporary directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Holds the notes snapshot and doubles as the config home so a user's
/// own config never leaks into tests.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the environment root
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment with an empty snapshot.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        let env = Self {
            _temp_dir: temp_dir,
            root,
        };
        env.write_notes(&[]);
        env
    }

    /// Returns the environment root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the default snapshot file.
    pub fn notes_path(&self) -> PathBuf {
        self.root.join(NOTES_FILE)
    }

    /// Replaces the default snapshot with `notes`.
    pub fn write_notes(&self, notes: &[TestNote]) -> PathBuf {
        self.write_snapshot(NOTES_FILE, notes)
    }

    /// Writes `notes` as a JSON snapshot named `name` and returns its path.
    pub fn write_snapshot(&self, name: &str, notes: &[TestNote]) -> PathBuf {
        let notes: Vec<Note> = notes.iter().map(TestNote::to_note).collect();
        let json = serde_json::to_string_pretty(&notes).expect("Failed to serialize notes");
        self.write_file(name, &json)
    }

    /// Writes `contents` to `~/.config/grove/config.toml` for this environment.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.root.join(".config").join("grove");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a GroveCommand configured for this test environment.
    pub fn cmd(&self) -> GroveCommand {
        GroveCommand::new()
            .config_home(&self.root)
            .notes(&self.notes_path())
    }

    /// Creates a GroveCommand with isolated config but no `--notes` flag.
    pub fn bare_cmd(&self) -> GroveCommand {
        GroveCommand::new().config_home(&self.root)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove::infra::read_snapshot;

    // ===========================================
    // TestEnv Foundation
    // ===========================================

    #[test]
    fn test_env_creates_empty_snapshot() {
        let env = TestEnv::new();
        assert!(env.notes_path().is_file());
        assert!(read_snapshot(&env.notes_path()).unwrap().is_empty());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--notes");
        assert_eq!(args[1], env.notes_path().to_string_lossy());
    }

    // ===========================================
    // Snapshot Writing
    // ===========================================

    #[test]
    fn test_env_snapshot_round_trips_through_loader() {
        let env = TestEnv::new();
        env.write_notes(&[
            TestNote::new("First").id("a").tag("work/ideas"),
            TestNote::new("Second").id("b").content("body"),
        ]);

        let notes = read_snapshot(&env.notes_path()).unwrap();
        let titles: Vec<_> = notes.iter().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(notes[0].tags()[0].as_str(), "work/ideas");
        assert_eq!(notes[1].content(), "body");
    }
}
