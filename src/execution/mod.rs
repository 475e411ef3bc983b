//! Plan execution

pub mod engine;
pub mod steps;

pub use engine::{EventHandler, ExecutionEngine, RunError, RunEvent, RunReport, StepOutcome};
pub use steps::{standard_graph, DEFAULT_GOAL};
