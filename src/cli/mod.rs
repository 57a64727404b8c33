//! Command-line parsing for the `chassis` setup tool.
//!
//! Parsing lives here; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "chassis", version, about = "Street-car suspension setup and weight-transfer calculator")]
pub struct Cli {
    /// Preset catalog JSON to use instead of the built-in one.
    ///
    /// Falls back to `CHASSIS_CATALOG` (a `.env` file is honored).
    #[arg(long, global = true, value_name = "JSON", env = "CHASSIS_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log resolution and compute steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every preset in the catalog.
    List,
    /// Resolve a preset (plus optional overrides) and print its setup report.
    Show(ShowArgs),
    /// Resolve and compute every preset, reporting diagnostics per vehicle.
    Audit(AuditArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Preset id, as printed by `chassis list`.
    pub id: String,

    /// JSON file of tunable overrides.
    #[arg(long, value_name = "JSON")]
    pub overrides: Option<PathBuf>,

    /// Steady lateral acceleration in g (positive = right-hand turn).
    #[arg(long, allow_hyphen_values = true)]
    pub lateral_g: Option<f64>,

    /// Steady longitudinal acceleration in g (positive = accelerating, negative = braking).
    #[arg(long, allow_hyphen_values = true)]
    pub longitudinal_g: Option<f64>,

    /// Write the setup and report to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct AuditArgs {
    /// Only print presets that fail to resolve or carry error diagnostics.
    #[arg(long)]
    pub only_errors: bool,
}
