//! CLI output formatting

use crate::core::ExecutionPlan;
use crate::execution::RunEvent;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar across the steps of a plan
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format an execution plan as a numbered list
pub fn format_plan(plan: &ExecutionPlan) -> String {
    plan.steps()
        .iter()
        .enumerate()
        .map(|(i, step)| {
            if i + 1 == plan.len() {
                format!("  {}. {}", i + 1, style(step).bold())
            } else {
                format!("  {}. {}", i + 1, style(step).cyan())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a run event for display
pub fn format_run_event(event: &RunEvent) -> String {
    match event {
        RunEvent::RunStarted { run_id, goal, plan } => format!(
            "{} Running goal {} ({}): [{}]",
            ROCKET,
            style(goal).bold(),
            style(&run_id.to_string()[..8]).dim(),
            plan.join(" → ")
        ),
        RunEvent::StepStarted { step } => {
            format!("{} {}", SPINNER, style(step).cyan())
        }
        RunEvent::StepCompleted { step } => {
            format!("{} {}", CHECK, style(step).green())
        }
        RunEvent::RequirementFailed { step, requirement } => format!(
            "{} {}: requirement {} not satisfied",
            CROSS,
            style(step).red(),
            style(requirement).bold()
        ),
        RunEvent::StepFailed { step, error } => {
            format!("{} {}: {}", CROSS, style(step).red(), style(error).dim())
        }
        RunEvent::RunCompleted { run_id, success } => {
            let status = if *success {
                format!("{}", style("succeeded").green())
            } else {
                style("failed").red().to_string()
            };
            format!(
                "{} Run ({}) {}",
                INFO,
                style(&run_id.to_string()[..8]).dim(),
                status
            )
        }
    }
}
