//! git-based version metadata provider
//!
//! Reads the latest tag and the commit distance from it, the same inputs
//! the packaging step combines into the final package version. A
//! repository without any tag degrades to a default base version with the
//! full commit count as the distance.

use crate::core::version::{derive_version, VersionMetadata};
use crate::tools::{ToolError, VersionProvider};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

/// Base version used when the repository has no version tag yet
const UNTAGGED_BASE_VERSION: &str = "0.1.0";

/// Version metadata provider backed by the `git` CLI
#[derive(Debug, Clone)]
pub struct GitCli {
    git_path: String,
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            git_path: "git".to_string(),
            repo_root: repo_root.into(),
        }
    }

    /// Run `git` in the repository root and return trimmed stdout
    async fn run(&self, args: &[&str]) -> Result<String, ToolError> {
        debug!("Spawning {} {}", self.git_path, args.join(" "));

        let output = Command::new(&self.git_path)
            .args(args)
            .current_dir(&self.repo_root)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ToolError::Spawn {
                program: self.git_path.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ToolError::CommandFailed {
                program: self.git_path.clone(),
                code,
                output: stderr,
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| ToolError::InvalidOutput {
            program: self.git_path.clone(),
        })?;
        Ok(stdout.trim().to_string())
    }

    /// Latest reachable tag, or None for an untagged repository
    async fn latest_tag(&self) -> Result<Option<String>, ToolError> {
        match self.run(&["describe", "--tags", "--abbrev=0"]).await {
            Ok(tag) if !tag.is_empty() => Ok(Some(tag)),
            Ok(_) => Ok(None),
            Err(ToolError::CommandFailed { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn commit_count(&self, range: &str) -> Result<String, ToolError> {
        self.run(&["rev-list", range, "--count"]).await
    }
}

/// Four-part assembly version from the numeric part of a semantic version:
/// "0.3.0-beta" becomes "0.3.0.0"
fn assembly_version_of(sem_ver: &str) -> String {
    let numeric = sem_ver.split(['-', '+']).next().unwrap_or(sem_ver);
    format!("{numeric}.0")
}

#[async_trait]
impl VersionProvider for GitCli {
    async fn current(&self) -> Result<VersionMetadata, ToolError> {
        let (sem_ver, commits) = match self.latest_tag().await? {
            Some(tag) => {
                let commits = self.commit_count(&format!("{tag}..HEAD")).await?;
                let sem_ver = tag.strip_prefix('v').unwrap_or(&tag).to_string();
                (sem_ver, commits)
            }
            None => {
                warn!(
                    "No version tag found; falling back to {}",
                    UNTAGGED_BASE_VERSION
                );
                let commits = self.commit_count("HEAD").await?;
                (UNTAGGED_BASE_VERSION.to_string(), commits)
            }
        };

        let assembly_version = assembly_version_of(&sem_ver);
        let informational_version = derive_version(&sem_ver, &commits);

        Ok(VersionMetadata {
            assembly_version: assembly_version.clone(),
            file_version: assembly_version,
            informational_version,
            sem_ver,
            commits_since_version_source: commits,
        })
    }
}
