//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{PlanCommand, RunCommand, VersionCommand};
use std::ffi::OsString;

/// Build and release pipeline runner for NuGet library projects
#[derive(Debug, Parser, Clone)]
#[command(name = "packline")]
#[command(author = "Packline Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Clean, restore, compile, pack and push a NuGet library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a goal step and its dependencies (default goal: pack)
    Run(RunCommand),

    /// Show the execution plan for a goal
    Plan(PlanCommand),

    /// Show the version metadata and derived package version
    Version(VersionCommand),
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
