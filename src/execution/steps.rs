//! The standard step set: clean, restore, compile, pack, push
//!
//! Each body is a thin adapter over the injected toolchain; clean is the
//! only step that touches the filesystem directly.

use crate::core::step::{BuildContext, Requirement, Step, StepAction, StepError};
use crate::core::{derive_version, GraphError, TargetGraph};
use crate::tools::{PackRequest, VersionStamp};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Step names
pub const CLEAN: &str = "clean";
pub const RESTORE: &str = "restore";
pub const COMPILE: &str = "compile";
pub const PACK: &str = "pack";
pub const PUSH: &str = "push";

/// Default goal when none is requested
pub const DEFAULT_GOAL: &str = PACK;

/// Package metadata passed to the packaging tool
pub const PACKAGE_DESCRIPTION: &str =
    "Common configuration and implementations for my .Net microservices projects";
pub const PACKAGE_TAGS: &[&str] = &["microservice", ".net", "asp-net", "c#", "library"];

/// Build output directory names removed by clean
const OUTPUT_DIR_NAMES: &[&str] = &["bin", "obj"];

const PACKAGE_SUFFIX: &str = ".nupkg";
const SYMBOLS_SUFFIX: &str = ".symbols.nupkg";

/// Build the standard target graph. Edges mirror the release flow:
/// clean runs before restore, compile depends on restore, pack on
/// compile, push on pack.
pub fn standard_graph() -> Result<TargetGraph, GraphError> {
    let steps = vec![
        Step::new(CLEAN, Arc::new(CleanAction)).run_before(RESTORE),
        Step::new(RESTORE, Arc::new(RestoreAction)),
        Step::new(COMPILE, Arc::new(CompileAction)).depends_on(RESTORE),
        Step::new(PACK, Arc::new(PackAction)).depends_on(COMPILE),
        Step::new(PUSH, Arc::new(PushAction))
            .depends_on(PACK)
            .requires(Requirement::new("NugetApiUrl", |ctx: &BuildContext| {
                !ctx.config.nuget_api_url.is_empty()
            }))
            .requires(Requirement::new("NugetApiKey", |ctx: &BuildContext| {
                ctx.config
                    .nuget_api_key
                    .as_deref()
                    .is_some_and(|key| !key.is_empty())
            }))
            .requires(Requirement::new(
                "Configuration == Release",
                |ctx: &BuildContext| ctx.config.configuration.is_release(),
            )),
    ];

    TargetGraph::new(steps)
}

/// Delete generated output directories under the source tree and recreate
/// the packaging output directory empty
struct CleanAction;

#[async_trait]
impl StepAction for CleanAction {
    async fn run(&self, ctx: &BuildContext) -> Result<(), StepError> {
        for dir in output_dirs_under(&ctx.layout.source_dir) {
            info!("Removing {}", dir.display());
            match std::fs::remove_dir_all(&dir) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        let output = &ctx.layout.package_output_dir;
        match std::fs::remove_dir_all(output) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        std::fs::create_dir_all(output)?;
        debug!("Recreated {}", output.display());

        Ok(())
    }
}

/// Find `bin`/`obj` directories under `source_dir`, without descending
/// into a matched directory. A missing source tree yields nothing.
fn output_dirs_under(source_dir: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if !source_dir.is_dir() {
        return dirs;
    }

    let mut walker = WalkDir::new(source_dir).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| OUTPUT_DIR_NAMES.contains(&name))
        {
            dirs.push(entry.path().to_path_buf());
            walker.skip_current_dir();
        }
    }
    dirs
}

/// Restore project dependencies
struct RestoreAction;

#[async_trait]
impl StepAction for RestoreAction {
    async fn run(&self, ctx: &BuildContext) -> Result<(), StepError> {
        ctx.toolchain
            .restorer
            .restore(&ctx.layout.project_file)
            .await?;
        Ok(())
    }
}

/// Compile with version stamps from the source-control metadata provider
struct CompileAction;

#[async_trait]
impl StepAction for CompileAction {
    async fn run(&self, ctx: &BuildContext) -> Result<(), StepError> {
        let metadata = ctx.toolchain.versions.current().await?;
        let stamp = VersionStamp::from(&metadata);
        debug!(
            "Compiling {} as {} ({})",
            ctx.layout.project_file.display(),
            stamp.informational_version,
            ctx.config.configuration
        );
        ctx.toolchain
            .compiler
            .compile(&ctx.layout.project_file, ctx.config.configuration, &stamp)
            .await?;
        Ok(())
    }
}

/// Pack the already-built project with the derived package version
struct PackAction;

#[async_trait]
impl StepAction for PackAction {
    async fn run(&self, ctx: &BuildContext) -> Result<(), StepError> {
        let metadata = ctx.toolchain.versions.current().await?;
        let version = derive_version(&metadata.sem_ver, &metadata.commits_since_version_source);
        info!(
            "Packing {} version {} into {}",
            ctx.config.package,
            version,
            ctx.layout.package_output_dir.display()
        );

        let request = PackRequest {
            project_file: ctx.layout.project_file.clone(),
            configuration: ctx.config.configuration,
            version,
            description: PACKAGE_DESCRIPTION.to_string(),
            tags: PACKAGE_TAGS.iter().map(|t| t.to_string()).collect(),
            output_dir: ctx.layout.package_output_dir.clone(),
        };
        ctx.toolchain.packager.pack(&request).await?;
        Ok(())
    }
}

/// Push every packable artifact, skipping symbols packages; the first
/// failed push aborts the rest
struct PushAction;

#[async_trait]
impl StepAction for PushAction {
    async fn run(&self, ctx: &BuildContext) -> Result<(), StepError> {
        // Requirements guarantee the key is present by the time we run
        let api_key = ctx.config.nuget_api_key.as_deref().unwrap_or_default();

        let packages = packable_artifacts(&ctx.layout.package_output_dir)?;
        if packages.is_empty() {
            return Err(StepError::MissingArtifacts(
                ctx.layout.package_output_dir.clone(),
            ));
        }

        for package in packages {
            info!(
                "Pushing {} to {}",
                package.display(),
                ctx.config.nuget_api_url
            );
            ctx.toolchain
                .pusher
                .push(&package, &ctx.config.nuget_api_url, api_key)
                .await?;
        }
        Ok(())
    }
}

/// Enumerate `*.nupkg` files in `dir`, excluding symbols packages, sorted
/// by name for deterministic push order
pub fn packable_artifacts(dir: &Path) -> Result<Vec<PathBuf>, StepError> {
    let mut packages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.ends_with(PACKAGE_SUFFIX) && !name.ends_with(SYMBOLS_SUFFIX) {
            packages.push(entry.path());
        }
    }
    packages.sort();
    Ok(packages)
}
