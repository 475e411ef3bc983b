//! Step domain model

use crate::core::config::BuildConfig;
use crate::core::paths::ProjectLayout;
use crate::tools::{Toolchain, ToolError};
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Error from a step body
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no packable artifacts found in {}", .0.display())]
    MissingArtifacts(PathBuf),
}

/// Everything a step body may read: resolved configuration, the project
/// layout, and the injected toolchain. Built once per run, never mutated.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub config: BuildConfig,
    pub layout: ProjectLayout,
    pub toolchain: Toolchain,
}

/// The body of a step; side effects only through the toolchain and the
/// filesystem
#[async_trait]
pub trait StepAction: Send + Sync {
    async fn run(&self, ctx: &BuildContext) -> Result<(), StepError>;
}

/// A named requirement checked immediately before a step body runs.
///
/// Distinct from a dependency edge: requirements gate execution, edges
/// only affect ordering. Checks run at execution time, so they may depend
/// on state mutated by an earlier step in the same plan.
#[derive(Clone)]
pub struct Requirement {
    name: String,
    check: Arc<dyn Fn(&BuildContext) -> bool + Send + Sync>,
}

impl Requirement {
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&BuildContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_satisfied(&self, ctx: &BuildContext) -> bool {
        (self.check)(ctx)
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A single named build step
#[derive(Clone)]
pub struct Step {
    /// Unique step name
    pub name: String,

    /// Step names that must complete before this one runs
    pub depends_on: Vec<String>,

    /// Step names this one must run before; merged into the dependency
    /// graph as the same edge, oriented from this step to the named one
    pub run_before: Vec<String>,

    /// Requirements checked immediately before the body runs
    pub requirements: Vec<Requirement>,

    /// The step body
    pub action: Arc<dyn StepAction>,
}

impl Step {
    pub fn new(name: impl Into<String>, action: Arc<dyn StepAction>) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
            run_before: Vec::new(),
            requirements: Vec::new(),
            action,
        }
    }

    pub fn depends_on(mut self, step: impl Into<String>) -> Self {
        self.depends_on.push(step.into());
        self
    }

    pub fn run_before(mut self, step: impl Into<String>) -> Self {
        self.run_before.push(step.into());
        self
    }

    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("depends_on", &self.depends_on)
            .field("run_before", &self.run_before)
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}
