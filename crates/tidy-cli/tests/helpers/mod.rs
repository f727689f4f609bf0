use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary database
/// and configuration file.
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
    config_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let config_path = temp_dir.path().join("tidy.toml");

        Self {
            temp_dir,
            db_path,
            config_path,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tidy").expect("Failed to find tidy binary");
        cmd.current_dir(self.temp_dir.path())
            .env("TIDY_DATABASE_PATH", &self.db_path)
            .env("TIDY_CONFIG", &self.config_path)
            .env_remove("TIDY_LOG")
            .env_remove("TIDY_FLAGS_ENABLE_CATEGORIES")
            .env_remove("TIDY_FLAGS_ENABLE_DARK_MODE");
        cmd
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(&self.config_path, contents).expect("Failed to write config");
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Adds a task and returns the short id printed on creation.
    pub fn add_task(&self, args: &[&str]) -> String {
        let mut full = vec!["add"];
        full.extend_from_slice(args);
        let output = self.run_success(&full).get_output().stdout.clone();
        let stdout = strip_ansi(&String::from_utf8_lossy(&output));
        stdout
            .lines()
            .find_map(|line| line.split("Task ID: ").nth(1))
            .map(|id| id.trim().to_string())
            .expect("add did not print a task id")
    }
}

/// Removes `ESC [ ... m` color sequences.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Category"))
            .and(predicate::str::contains("Status"))
    }

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("✓").and(predicate::str::contains("Created task"))
    }

    pub fn empty_result() -> impl Predicate<str> {
        predicate::str::contains("No tasks found")
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
