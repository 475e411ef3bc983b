//! External tool capabilities
//!
//! The compiler, package manager, registry client, and source-control
//! metadata provider are modeled as capability traits injected into step
//! bodies, so the graph executor can be exercised with fakes instead of
//! real tool invocations.

pub mod dotnet;
pub mod git;

use crate::core::config::Configuration;
use crate::core::version::VersionMetadata;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub use dotnet::DotNetCli;
pub use git::GitCli;

/// Error types for external tool invocations
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool exited non-zero; `output` carries its diagnostic text verbatim
    #[error("{program} exited with code {code}: {output}")]
    CommandFailed {
        program: String,
        code: i32,
        output: String,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("could not decode {program} output as UTF-8")]
    InvalidOutput { program: String },

    #[error("version metadata unavailable: {0}")]
    Metadata(String),
}

/// Version-stamping fields passed to the compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStamp {
    pub assembly_version: String,
    pub file_version: String,
    pub informational_version: String,
}

impl From<&VersionMetadata> for VersionStamp {
    fn from(meta: &VersionMetadata) -> Self {
        Self {
            assembly_version: meta.assembly_version.clone(),
            file_version: meta.file_version.clone(),
            informational_version: meta.informational_version.clone(),
        }
    }
}

/// Everything the packaging tool needs for one pack invocation
#[derive(Debug, Clone)]
pub struct PackRequest {
    pub project_file: PathBuf,
    pub configuration: Configuration,
    pub version: String,
    pub description: String,
    pub tags: Vec<String>,
    pub output_dir: PathBuf,
}

/// Restores project dependencies
#[async_trait]
pub trait Restorer: Send + Sync {
    async fn restore(&self, project_file: &Path) -> Result<(), ToolError>;
}

/// Compiles the project with version stamps
#[async_trait]
pub trait Compiler: Send + Sync {
    async fn compile(
        &self,
        project_file: &Path,
        configuration: Configuration,
        stamp: &VersionStamp,
    ) -> Result<(), ToolError>;
}

/// Packs the compiled project into a package
#[async_trait]
pub trait Packager: Send + Sync {
    async fn pack(&self, request: &PackRequest) -> Result<(), ToolError>;
}

/// Pushes one package file to a registry
#[async_trait]
pub trait Pusher: Send + Sync {
    async fn push(&self, package: &Path, source: &str, api_key: &str) -> Result<(), ToolError>;
}

/// Supplies version metadata from source control
#[async_trait]
pub trait VersionProvider: Send + Sync {
    async fn current(&self) -> Result<VersionMetadata, ToolError>;
}

/// Shared handles to all tool capabilities for one run
#[derive(Clone)]
pub struct Toolchain {
    pub restorer: Arc<dyn Restorer>,
    pub compiler: Arc<dyn Compiler>,
    pub packager: Arc<dyn Packager>,
    pub pusher: Arc<dyn Pusher>,
    pub versions: Arc<dyn VersionProvider>,
}

impl Toolchain {
    /// The real toolchain: `dotnet` for restore/compile/pack/push and
    /// `git` for version metadata.
    pub fn dotnet(repo_root: impl Into<PathBuf>) -> Self {
        let dotnet = Arc::new(DotNetCli::default());
        Self {
            restorer: dotnet.clone(),
            compiler: dotnet.clone(),
            packager: dotnet.clone(),
            pusher: dotnet,
            versions: Arc::new(GitCli::new(repo_root)),
        }
    }
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain").finish_non_exhaustive()
    }
}
