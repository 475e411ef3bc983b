//! CLI command definitions

use crate::core::config::{ConfigOverrides, Configuration};
use clap::Args;
use std::path::PathBuf;

/// Arguments shared by every command that resolves configuration
#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    /// Repository root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Package/project name (env: Package)
    #[arg(long)]
    pub package: Option<String>,

    /// Build configuration: Debug or Release (env: Configuration)
    #[arg(long)]
    pub configuration: Option<Configuration>,

    /// Registry endpoint (env: NugetApiUrl)
    #[arg(long)]
    pub nuget_api_url: Option<String>,

    /// Registry credential (env: NugetApiKey)
    #[arg(long)]
    pub nuget_api_key: Option<String>,
}

impl ConfigArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            configuration: self.configuration,
            nuget_api_url: self.nuget_api_url.clone(),
            nuget_api_key: self.nuget_api_key.clone(),
            package: self.package.clone(),
        }
    }
}

/// Run a goal step and its dependencies
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Goal step name
    #[arg(default_value = crate::execution::DEFAULT_GOAL)]
    pub goal: String,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the run report as JSON on success
    #[arg(long)]
    pub json: bool,
}

/// Show the execution plan for a goal without running it
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    /// Goal step name
    #[arg(default_value = crate::execution::DEFAULT_GOAL)]
    pub goal: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show the version metadata and the derived package version
#[derive(Debug, Args, Clone)]
pub struct VersionCommand {
    /// Repository root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
