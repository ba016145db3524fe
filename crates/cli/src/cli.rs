// SPDX-License-Identifier: MIT

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::artifact::ReportStyle;

/// A build verifier for make-style projects
#[derive(Parser)]
#[command(name = "anneal")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "ANNEAL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the clean-and-build verification
    Check(CheckArgs),
    /// Initialize anneal configuration
    Init(InitArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Project directory to build
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Build command (overrides config)
    #[arg(long, value_name = "CMD")]
    pub build: Option<String>,

    /// Clean command (overrides config; empty string disables the step)
    #[arg(long, value_name = "CMD")]
    pub clean: Option<String>,

    /// Build step timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Clean step timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub clean_timeout: Option<u64>,

    /// Expected artifact path, relative to the project directory
    #[arg(long, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Artifact report style on success
    #[arg(long, value_name = "STYLE")]
    pub report: Option<ReportStyle>,

    /// Max trailing characters of captured output shown on failure
    #[arg(long, value_name = "N")]
    pub tail: Option<usize>,

    /// Show captured output in full
    #[arg(long)]
    pub no_tail: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Output format for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Machine-readable JSON
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
