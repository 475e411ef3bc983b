//! Core domain models for packline
//!
//! This module defines the target graph, step model, configuration,
//! path resolution, and version derivation.

pub mod config;
pub mod graph;
pub mod paths;
pub mod step;
pub mod version;

pub use config::{BuildConfig, ConfigError, ConfigOverrides, Configuration};
pub use graph::{ExecutionPlan, GraphError, TargetGraph};
pub use paths::ProjectLayout;
pub use step::{BuildContext, Requirement, Step, StepAction, StepError};
pub use version::{derive_version, VersionMetadata};
