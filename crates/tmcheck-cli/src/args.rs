use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tmcheck")]
#[command(about = "Validate telemetry parameters in test-run logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file with subsystem profiles [default: ./tmcheck.toml]
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check measured values against declared min/max ranges
    Range {
        /// Telemetry config: TM id -> parameter names (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Range expectations: parameter -> {min, max} (JSON, or YAML for .yaml/.yml)
        #[arg(long)]
        expected: PathBuf,

        /// Log captured from the test run
        #[arg(long)]
        log: PathBuf,

        /// Write the report to a file (.csv, or .json)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Compare the latest telemetry blocks against a golden reference log
    Reference {
        /// Telemetry config: TM id -> parameter names (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Log captured from the test run
        #[arg(long)]
        log: PathBuf,

        /// Golden log captured from a known-good run
        #[arg(long)]
        reference: PathBuf,

        /// Text preceding the TM id on marker lines
        #[arg(long)]
        marker: Option<String>,

        /// Write the report to a file (.csv, or .json)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Run a subsystem profile from the settings file
    Run {
        #[arg(long)]
        profile: String,

        /// Override the profile's report path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// List configured subsystem profiles
    List,
}
