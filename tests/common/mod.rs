//! Shared testing utilities for flowdeploy CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Directory used as the working directory for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Write a config document and return its path.
    pub fn write_config(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(file_name);
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Build a command for invoking the compiled `flowdeploy` binary.
    ///
    /// Registration API environment overrides from the host are cleared.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("flowdeploy").expect("Failed to locate flowdeploy binary");
        cmd.current_dir(self.work_dir())
            .env_remove("FLOWDEPLOY_API_URL")
            .env_remove("FLOWDEPLOY_API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Config with ten cron entries where the fifth has an unsupported schedule type.
#[allow(dead_code)]
pub fn ten_entries_with_bogus_fifth(api_url: &str) -> String {
    let mut content =
        format!("api:\n  url: {}\n  max_attempts: 1\n  timeout_secs: 5\nflows:\n", api_url);
    for i in 1..=10 {
        let kind = if i == 5 { "bogus" } else { "cron" };
        content.push_str(&format!(
            "  - entrypoint: flows/job{i}.py:run\n    name: job-{i}\n    schedule:\n      type: {kind}\n      cron: \"0 {i} * * *\"\n"
        ));
    }
    content
}
