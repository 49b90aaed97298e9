//! Fixtures for sample data placement.
//!
//! The sample EPS files live with the engine tests so that engine and CLI
//! tests exercise the same inputs.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const EPS_CONFIG: &str = "eps_config.json";
pub const EPS_EXPECTED: &str = "eps_expected.json";
pub const EPS_EXPECTED_YAML: &str = "eps_expected.yaml";
pub const EPS_TEST_LOG: &str = "eps_test.log";
pub const EPS_REFERENCE_LOG: &str = "eps_reference.log";

pub const EPS_SAMPLES: [&str; 5] = [
    EPS_CONFIG,
    EPS_EXPECTED,
    EPS_EXPECTED_YAML,
    EPS_TEST_LOG,
    EPS_REFERENCE_LOG,
];

/// Sample file manager for test data.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Create a new sample file manager.
    ///
    /// Assumes samples are in `crates/tmcheck-engine/tests/fixtures/`.
    pub fn new() -> Self {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let samples_dir = manifest_dir
            .parent()
            .unwrap()
            .join("tmcheck-engine/tests/fixtures");

        Self { samples_dir }
    }

    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    /// Copy a sample file to a destination.
    pub fn copy_to(&self, sample_name: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let source = self.path(sample_name);
        fs::copy(&source, dest)
            .with_context(|| format!("Failed to copy sample {}", source.display()))?;
        Ok(())
    }
}
