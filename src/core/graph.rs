//! Target graph and execution-plan resolution
//!
//! Steps form an explicit directed graph. `run_before` declarations are
//! merged into the same edge orientation as `depends_on` at construction
//! time, so ordering comes from a single topological sort. A plan is the
//! transitive dependency closure of one goal step, deduplicated, with
//! dependencies first and ties broken by declaration order.

use crate::core::step::Step;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Graph construction and plan-resolution errors; all fatal configuration
/// errors, reported before any step runs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate step name '{0}'")]
    DuplicateStep(String),

    #[error("step '{step}' references unknown step '{references}'")]
    UnknownReference { step: String, references: String },

    #[error("unknown goal step '{0}'")]
    UnknownGoal(String),

    #[error("dependency cycle involving step '{0}'")]
    Cycle(String),
}

/// Ordered, deduplicated sequence of step names satisfying a goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    steps: Vec<String>,
}

impl ExecutionPlan {
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s == step)
    }

    /// The goal step is always last
    pub fn goal(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }
}

/// Immutable set of named steps with merged dependency edges
#[derive(Debug, Clone)]
pub struct TargetGraph {
    steps: Vec<Step>,
    index: HashMap<String, usize>,
    /// Merged incoming edges per step, in deterministic order
    dependencies: Vec<Vec<usize>>,
}

impl TargetGraph {
    /// Build the graph, merging `run_before` edges into the dependency
    /// lists and validating every reference
    pub fn new(steps: Vec<Step>) -> Result<Self, GraphError> {
        let mut index = HashMap::new();
        for (i, step) in steps.iter().enumerate() {
            if index.insert(step.name.clone(), i).is_some() {
                return Err(GraphError::DuplicateStep(step.name.clone()));
            }
        }

        let lookup = |from: &Step, name: &str| -> Result<usize, GraphError> {
            index
                .get(name)
                .copied()
                .ok_or_else(|| GraphError::UnknownReference {
                    step: from.name.clone(),
                    references: name.to_string(),
                })
        };

        let mut dependencies: Vec<Vec<usize>> = vec![Vec::new(); steps.len()];
        for (i, step) in steps.iter().enumerate() {
            for dep in &step.depends_on {
                dependencies[i].push(lookup(step, dep)?);
            }
        }
        // A.run_before(B) is the same edge as B.depends_on(A)
        for (i, step) in steps.iter().enumerate() {
            for successor in &step.run_before {
                let target = lookup(step, successor)?;
                if !dependencies[target].contains(&i) {
                    dependencies[target].push(i);
                }
            }
        }

        Ok(Self {
            steps,
            index,
            dependencies,
        })
    }

    pub fn step(&self, name: &str) -> Option<&Step> {
        self.index.get(name).map(|&i| &self.steps[i])
    }

    /// All step names in declaration order
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.name.as_str())
    }

    /// Resolve the execution plan for `goal`: its transitive dependency
    /// closure in a valid topological order, goal last
    pub fn plan(&self, goal: &str) -> Result<ExecutionPlan, GraphError> {
        let &goal_idx = self
            .index
            .get(goal)
            .ok_or_else(|| GraphError::UnknownGoal(goal.to_string()))?;

        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut in_progress = HashSet::new();
        self.visit(goal_idx, &mut visited, &mut in_progress, &mut order)?;

        Ok(ExecutionPlan {
            steps: order.into_iter().map(|i| self.steps[i].name.clone()).collect(),
        })
    }

    fn visit(
        &self,
        idx: usize,
        visited: &mut HashSet<usize>,
        in_progress: &mut HashSet<usize>,
        order: &mut Vec<usize>,
    ) -> Result<(), GraphError> {
        if visited.contains(&idx) {
            return Ok(());
        }
        // Must never occur with static declarations, but guard anyway
        if !in_progress.insert(idx) {
            return Err(GraphError::Cycle(self.steps[idx].name.clone()));
        }

        for &dep in &self.dependencies[idx] {
            self.visit(dep, visited, in_progress, order)?;
        }

        in_progress.remove(&idx);
        visited.insert(idx);
        order.push(idx);
        Ok(())
    }
}
