//! Well-known filesystem locations derived from the repository root
//!
//! Pure path arithmetic, no I/O. The only failure modes are an invalid
//! root or an empty package name, both fatal configuration errors.

use crate::core::config::ConfigError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Directory holding final packaged outputs, under the artifacts directory
pub const PACKAGE_OUTPUT_SUBDIR: &str = "nuget";

/// Resolved project layout for a single repository
#[derive(Debug, Clone, Serialize)]
pub struct ProjectLayout {
    /// Absolute repository root
    pub root: PathBuf,

    /// Source tree: `<root>/src`
    pub source_dir: PathBuf,

    /// Project file: `<root>/src/<package>/<package>.csproj`
    pub project_file: PathBuf,

    /// Artifacts directory: `<root>/artifacts`
    pub artifacts_dir: PathBuf,

    /// Packaging output: `<root>/artifacts/nuget`
    pub package_output_dir: PathBuf,
}

impl ProjectLayout {
    /// Resolve the layout for `package` under `root`
    pub fn new(root: impl Into<PathBuf>, package: &str) -> Result<Self, ConfigError> {
        let root = root.into();
        if root.as_os_str().is_empty() || !root.is_absolute() {
            return Err(ConfigError::InvalidRoot(root.display().to_string()));
        }
        if package.is_empty() {
            return Err(ConfigError::MissingPackage);
        }

        let source_dir = root.join("src");
        let project_file = source_dir
            .join(package)
            .join(format!("{package}.csproj"));
        let artifacts_dir = root.join("artifacts");
        let package_output_dir = artifacts_dir.join(PACKAGE_OUTPUT_SUBDIR);

        Ok(Self {
            root,
            source_dir,
            project_file,
            artifacts_dir,
            package_output_dir,
        })
    }
}

impl AsRef<Path> for ProjectLayout {
    fn as_ref(&self) -> &Path {
        &self.root
    }
}
