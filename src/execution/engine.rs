//! Graph executor - resolves a plan and runs it strictly sequentially
//!
//! One step at a time, each awaited to completion. Requirements of every
//! planned step are validated up front before the first body runs, then
//! re-checked immediately before each body; the first failure of any kind
//! aborts the remaining plan. Every external call is attempted exactly
//! once per run; there is no retry policy.

use crate::core::{BuildContext, GraphError, Step, StepError, TargetGraph};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Run failure taxonomy: plan resolution (configuration) errors, unmet
/// requirements, and step-body (external tool) failures
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Plan(#[from] GraphError),

    #[error("requirement '{requirement}' not satisfied for step '{step}'")]
    RequirementNotMet { step: String, requirement: String },

    #[error("step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: StepError,
    },
}

/// Events emitted during a run
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        run_id: Uuid,
        goal: String,
        plan: Vec<String>,
    },
    StepStarted {
        step: String,
    },
    StepCompleted {
        step: String,
    },
    RequirementFailed {
        step: String,
        requirement: String,
    },
    StepFailed {
        step: String,
        error: String,
    },
    RunCompleted {
        run_id: Uuid,
        success: bool,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(RunEvent) + Send + Sync>;

/// Outcome of one completed step
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Report for a fully successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub goal: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub steps: Vec<StepOutcome>,
}

/// Executes one goal against a target graph
pub struct ExecutionEngine {
    graph: TargetGraph,
    event_handlers: Vec<EventHandler>,
}

impl ExecutionEngine {
    pub fn new(graph: TargetGraph) -> Self {
        Self {
            graph,
            event_handlers: Vec::new(),
        }
    }

    pub fn graph(&self) -> &TargetGraph {
        &self.graph
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(RunEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit(&self, event: RunEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Plan entries are produced by this graph, so the lookup is infallible
    fn planned_step(&self, name: &str) -> &Step {
        match self.graph.step(name) {
            Some(step) => step,
            None => unreachable!("planned step '{name}' not registered in the graph"),
        }
    }

    fn fail_requirement(&self, run_id: Uuid, step: &str, requirement: &str) -> RunError {
        error!(
            "Requirement '{}' not satisfied for step '{}'",
            requirement, step
        );
        self.emit(RunEvent::RequirementFailed {
            step: step.to_string(),
            requirement: requirement.to_string(),
        });
        self.emit(RunEvent::RunCompleted {
            run_id,
            success: false,
        });
        RunError::RequirementNotMet {
            step: step.to_string(),
            requirement: requirement.to_string(),
        }
    }

    /// Resolve the plan for `goal` and execute it.
    ///
    /// Returns a report only when every step in the plan completed; any
    /// failure identifies the step and its cause.
    pub async fn run(&self, goal: &str, ctx: &BuildContext) -> Result<RunReport, RunError> {
        let plan = self.graph.plan(goal)?;
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        info!(
            "Starting run {} for goal '{}': [{}]",
            run_id,
            goal,
            plan.steps().join(", ")
        );
        self.emit(RunEvent::RunStarted {
            run_id,
            goal: goal.to_string(),
            plan: plan.steps().to_vec(),
        });

        // Every planned step's requirements are validated before the first
        // body runs; missing push credentials abort the run with nothing
        // cleaned, compiled or packed
        for name in plan.steps() {
            let step = self.planned_step(name);
            for requirement in &step.requirements {
                if !requirement.is_satisfied(ctx) {
                    return Err(self.fail_requirement(run_id, name, requirement.name()));
                }
            }
        }

        let mut outcomes = Vec::with_capacity(plan.len());
        for name in plan.steps() {
            let step = self.planned_step(name);

            // Re-checked right before the body so a requirement may also
            // observe state earlier steps produced
            for requirement in &step.requirements {
                if !requirement.is_satisfied(ctx) {
                    return Err(self.fail_requirement(run_id, name, requirement.name()));
                }
            }

            info!("Executing step: {}", name);
            self.emit(RunEvent::StepStarted { step: name.clone() });
            let step_started_at = Utc::now();

            match step.action.run(ctx).await {
                Ok(()) => {
                    outcomes.push(StepOutcome {
                        step: name.clone(),
                        started_at: step_started_at,
                        completed_at: Utc::now(),
                    });
                    self.emit(RunEvent::StepCompleted { step: name.clone() });
                }
                Err(e) => {
                    error!("Step '{}' failed: {}", name, e);
                    self.emit(RunEvent::StepFailed {
                        step: name.clone(),
                        error: e.to_string(),
                    });
                    self.emit(RunEvent::RunCompleted {
                        run_id,
                        success: false,
                    });
                    return Err(RunError::StepFailed {
                        step: name.clone(),
                        source: e,
                    });
                }
            }
        }

        let completed_at = Utc::now();
        info!("Run {} completed: {} steps", run_id, outcomes.len());
        self.emit(RunEvent::RunCompleted {
            run_id,
            success: true,
        });

        Ok(RunReport {
            run_id,
            goal: goal.to_string(),
            started_at,
            completed_at,
            steps: outcomes,
        })
    }
}
