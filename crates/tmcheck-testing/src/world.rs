//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Placing sample configs and logs
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::{EPS_SAMPLES, SampleFiles};

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use tmcheck_testing::TestWorld;
///
/// let world = TestWorld::new().with_eps_samples();
///
/// let result = world
///     .run(&["range", "--config", "eps_config.json", "--expected", "eps_expected.json", "--log", "eps_test.log"])
///     .unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    cwd: PathBuf,
    env_vars: HashMap<String, String>,
    samples: SampleFiles,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        Self {
            cwd: temp_dir.path().to_path_buf(),
            temp_dir,
            env_vars: HashMap::new(),
            samples: SampleFiles::new(),
        }
    }

    /// Path of a file relative to the temp root.
    pub fn path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Change the current working directory (relative to temp root).
    pub fn enter_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        let new_cwd = self.path(path);
        std::fs::create_dir_all(&new_cwd).expect("Failed to create directory");
        self.cwd = new_cwd;
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Copy the EPS sample config, expectations and logs to the temp root.
    pub fn with_eps_samples(self) -> Self {
        for sample in EPS_SAMPLES {
            self.copy_sample(sample, sample)
                .expect("Failed to copy EPS sample");
        }
        self
    }

    /// Write `tmcheck.toml` at the temp root.
    pub fn with_settings(self, content: &str) -> Self {
        self.write_file("tmcheck.toml", content)
            .expect("Failed to write settings");
        self
    }

    /// Write a file relative to the temp root.
    pub fn write_file<P: AsRef<Path>>(&self, relative: P, content: &str) -> Result<PathBuf> {
        let dest = self.path(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&dest, content)?;
        Ok(dest)
    }

    /// Copy a sample file to a path relative to the temp root.
    pub fn copy_sample(&self, sample_name: &str, dest_name: &str) -> Result<PathBuf> {
        let dest = self.path(dest_name);
        self.samples.copy_to(sample_name, &dest)?;
        Ok(dest)
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from `cargo_bin("tmcheck")`).
    /// Inherited `RUST_LOG` and `TMCHECK_SETTINGS` are cleared so runs are
    /// reproducible.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(&self.cwd)
            .env_remove("RUST_LOG")
            .env_remove("TMCHECK_SETTINGS");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a CLI command in this environment.
    ///
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built, which cargo test does automatically for the CLI crate.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("tmcheck")
            .map_err(|e| anyhow::anyhow!("Failed to find tmcheck binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
