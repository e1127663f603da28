//! CLI command definitions for the `autolearn` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod skill;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Register, inspect and run composable skills.
#[derive(Parser)]
#[command(name = "autolearn", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to config.toml (defaults to ~/.autolearn/config.toml).
    #[arg(long, global = true, env = "AUTOLEARN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered skills.
    #[command(alias = "ls")]
    List,

    /// Show a skill's metadata and signature.
    Inspect {
        /// Skill name.
        name: String,
    },

    /// Run a skill as a top-level invocation.
    Run {
        /// Skill name.
        name: String,

        /// Keyword arguments as a JSON object, e.g. '{"x": 3, "y": 4}'.
        #[arg(long, default_value = "{}")]
        args: String,

        /// Override the configured maximum call depth for this run.
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
