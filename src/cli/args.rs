//! Command-line argument definitions for the EIS preprocessor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::services::eis_reader::RunSelection;
use crate::app::services::grouping::GroupKey;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the EIS preprocessor
///
/// Normalizes operator-typed experiment labels and cleans impedance sweeps
/// exported by a battery cycler.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "eis-preprocessor",
    version,
    about = "Normalize labels and clean battery EIS exports",
    long_about = "Reads battery cycler EIS exports, disambiguates the free-text experiment \
                  labels into battery batch, number and test temperature, renames every sweep \
                  to a canonical label and removes non-physical points and single-sample \
                  glitches from the impedance spectra."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load, rename and filter every export under a directory
    Process(ProcessArgs),
    /// Decode labels into battery identities
    Identify(IdentifyArgs),
    /// Show how the exports partition by batch, temperature or battery number
    Groups(GroupsArgs),
}

/// Logging verbosity shared by all commands
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerbosityArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl VerbosityArgs {
    /// Level requested on the command line, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Where exports come from; shared by commands that read files
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InputArgs {
    /// Directory searched recursively for EIS exports
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: Option<PathBuf>,

    /// Path to configuration file (TOML format)
    ///
    /// If not specified, looks for <config dir>/eis-preprocessor/config.toml
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Read the main exports or the copies in `*All` directories
    #[arg(long = "selection", value_enum, value_name = "RUNS")]
    pub selection: Option<RunSelection>,

    /// Glob matched against export file names
    #[arg(long = "pattern", value_name = "GLOB")]
    pub file_pattern: Option<String>,

    /// Number of files parsed concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Canonical label prefix
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub canonical_prefix: Option<String>,
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Ratio of one-step to two-step distance at which a point is a glitch
    #[arg(long = "outlier-tolerance", value_name = "RATIO")]
    pub outlier_tolerance: Option<f64>,

    /// Keep points with non-positive real impedance
    #[arg(long = "keep-negative-real")]
    pub keep_negative_real: bool,

    /// Skip single-point outlier removal
    #[arg(long = "keep-outliers")]
    pub keep_outliers: bool,

    /// Write the processed dataset as JSON to this file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Output format for the report
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub verbosity: VerbosityArgs,
}

impl ProcessArgs {
    /// Validate argument combinations
    pub fn validate(&self) -> Result<()> {
        if let Some(tolerance) = self.outlier_tolerance {
            if !tolerance.is_finite() || tolerance <= 0.0 {
                return Err(Error::configuration(format!(
                    "--outlier-tolerance must be a positive number, got {}",
                    tolerance
                )));
            }
        }
        if self.input.workers == Some(0) {
            return Err(Error::configuration("--workers must be greater than 0"));
        }
        Ok(())
    }
}

/// Arguments for the identify command
#[derive(Debug, Clone, Parser)]
pub struct IdentifyArgs {
    /// Labels to decode; when empty, labels are read from the exports under --input
    #[arg(value_name = "LABEL")]
    pub labels: Vec<String>,

    #[command(flatten)]
    pub input: InputArgs,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub verbosity: VerbosityArgs,
}

/// Arguments for the groups command
#[derive(Debug, Clone, Parser)]
pub struct GroupsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Attribute of the outer partition
    #[arg(long = "by", value_enum, default_value = "batch")]
    pub by: GroupBy,

    /// Attribute partitioning each outer group again
    #[arg(long = "then", value_enum)]
    pub then: Option<GroupBy>,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub verbosity: VerbosityArgs,
}

impl GroupsArgs {
    /// Validate argument combinations
    pub fn validate(&self) -> Result<()> {
        if self.then == Some(self.by) {
            return Err(Error::configuration(
                "--then must name a different attribute than --by",
            ));
        }
        Ok(())
    }
}

/// Identity attribute selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    Batch,
    Temperature,
    Number,
}

impl From<GroupBy> for GroupKey {
    fn from(by: GroupBy) -> Self {
        match by {
            GroupBy::Batch => GroupKey::Batch,
            GroupBy::Temperature => GroupKey::Temperature,
            GroupBy::Number => GroupKey::BatteryNumber,
        }
    }
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}
