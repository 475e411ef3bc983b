//! dotnet CLI subprocess adapter
//!
//! Each capability is one blocking `dotnet` invocation awaited to
//! completion. Pack assumes compile already ran in the same run and passes
//! `--no-build --no-restore`. No timeout or retry semantics; a failed call
//! surfaces the tool's own diagnostic output verbatim.

use crate::core::config::Configuration;
use crate::tools::{Compiler, PackRequest, Packager, Pusher, Restorer, ToolError, VersionStamp};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

/// Adapter over the `dotnet` executable
#[derive(Debug, Clone)]
pub struct DotNetCli {
    /// Path to the dotnet executable
    dotnet_path: String,
}

impl DotNetCli {
    /// Create an adapter with an explicit executable path
    pub fn new(dotnet_path: impl Into<String>) -> Self {
        Self {
            dotnet_path: dotnet_path.into(),
        }
    }

    #[cfg(test)]
    pub fn dotnet_path(&self) -> &str {
        &self.dotnet_path
    }

    /// Run `dotnet` with the given arguments and capture its output
    async fn run(&self, args: &[String]) -> Result<String, ToolError> {
        debug!("Spawning {} {}", self.dotnet_path, args.join(" "));

        let output = Command::new(&self.dotnet_path)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ToolError::Spawn {
                program: self.dotnet_path.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            // dotnet writes most diagnostics to stdout; keep both streams
            let mut diagnostics = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                if !diagnostics.is_empty() {
                    diagnostics.push('\n');
                }
                diagnostics.push_str(stderr.trim());
            }
            warn!("dotnet exited with code {}: {}", code, diagnostics);
            return Err(ToolError::CommandFailed {
                program: self.dotnet_path.clone(),
                code,
                output: diagnostics,
            });
        }

        String::from_utf8(output.stdout).map_err(|_| ToolError::InvalidOutput {
            program: self.dotnet_path.clone(),
        })
    }
}

impl Default for DotNetCli {
    fn default() -> Self {
        Self::new("dotnet")
    }
}

#[async_trait]
impl Restorer for DotNetCli {
    async fn restore(&self, project_file: &Path) -> Result<(), ToolError> {
        let args = vec!["restore".to_string(), project_file.display().to_string()];
        self.run(&args).await.map(|_| ())
    }
}

#[async_trait]
impl Compiler for DotNetCli {
    async fn compile(
        &self,
        project_file: &Path,
        configuration: Configuration,
        stamp: &VersionStamp,
    ) -> Result<(), ToolError> {
        let args = vec![
            "build".to_string(),
            project_file.display().to_string(),
            "--configuration".to_string(),
            configuration.to_string(),
            "--no-restore".to_string(),
            format!("/p:AssemblyVersion={}", stamp.assembly_version),
            format!("/p:FileVersion={}", stamp.file_version),
            format!("/p:InformationalVersion={}", stamp.informational_version),
        ];
        self.run(&args).await.map(|_| ())
    }
}

fn pack_args(request: &PackRequest) -> Vec<String> {
    vec![
        "pack".to_string(),
        request.project_file.display().to_string(),
        "--configuration".to_string(),
        request.configuration.to_string(),
        "--no-build".to_string(),
        "--no-restore".to_string(),
        "--no-dependencies".to_string(),
        "--output".to_string(),
        request.output_dir.display().to_string(),
        format!("/p:PackageVersion={}", request.version),
        format!("/p:Description={}", request.description),
        format!("/p:PackageTags={}", request.tags.join(" ")),
    ]
}

#[async_trait]
impl Packager for DotNetCli {
    async fn pack(&self, request: &PackRequest) -> Result<(), ToolError> {
        self.run(&pack_args(request)).await.map(|_| ())
    }
}

#[async_trait]
impl Pusher for DotNetCli {
    async fn push(&self, package: &Path, source: &str, api_key: &str) -> Result<(), ToolError> {
        let args = vec![
            "nuget".to_string(),
            "push".to_string(),
            package.display().to_string(),
            "--source".to_string(),
            source.to_string(),
            "--api-key".to_string(),
            api_key.to_string(),
        ];
        self.run(&args).await.map(|_| ())
    }
}
