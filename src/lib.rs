//! packline - a build and release pipeline runner for NuGet library projects

pub mod cli;
pub mod core;
pub mod execution;
pub mod tools;

// Re-export commonly used types
pub use crate::core::{
    derive_version, BuildConfig, BuildContext, ConfigError, ConfigOverrides, Configuration,
    ExecutionPlan, GraphError, ProjectLayout, Requirement, Step, StepAction, StepError,
    TargetGraph, VersionMetadata,
};
pub use crate::execution::{standard_graph, ExecutionEngine, RunError, RunEvent, RunReport};
pub use crate::tools::{
    Compiler, DotNetCli, GitCli, PackRequest, Packager, Pusher, Restorer, ToolError, Toolchain,
    VersionProvider, VersionStamp,
};
