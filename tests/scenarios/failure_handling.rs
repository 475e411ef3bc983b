//! Test: first failure aborts the remaining plan

use crate::helpers::*;
use packline::core::GraphError;
use packline::execution::RunError;

#[tokio::test]
async fn test_restore_failure_stops_the_run() {
    let build = test_build(MockTools::new().failing("restore"));

    let result = run_goal(&build, "pack").await;

    assert_failed_on(&result, "restore");
    // Compile and pack never ran
    assert_calls(&build, &["restore"]);
}

#[tokio::test]
async fn test_compile_failure_stops_before_pack() {
    let build = test_build(MockTools::new().failing("compile"));

    let result = run_goal(&build, "pack").await;

    assert_failed_on(&result, "compile");
    assert_calls(&build, &["restore", "compile Release 0.3.0-beta2"]);
}

#[tokio::test]
async fn test_tool_diagnostics_surface_verbatim() {
    let build = test_build(MockTools::new().failing("restore"));

    let result = run_goal(&build, "pack").await;

    let error = result.unwrap_err().to_string();
    assert!(
        error.contains("restore failed: simulated tool diagnostics"),
        "error should carry the tool's own output, got: {error}"
    );
}

#[tokio::test]
async fn test_first_push_failure_aborts_remaining_pushes() {
    let tools = MockTools::new()
        .writing_packages(vec!["Alpha.1.0.0.nupkg", "Zeta.1.0.0.nupkg"])
        .failing_push_for("Alpha.1.0.0.nupkg");
    let build = test_build(tools);

    let result = run_goal(&build, "push").await;

    assert_failed_on(&result, "push");
    let calls = build.calls();
    let pushes: Vec<_> = calls.iter().filter(|c| c.starts_with("push")).collect();
    // No partial-success continuation: Zeta was never attempted
    assert_eq!(pushes, vec!["push Alpha.1.0.0.nupkg"]);
}

#[tokio::test]
async fn test_unknown_goal_fails_before_any_step() {
    let build = test_build(MockTools::new());

    let result = run_goal(&build, "deploy").await;

    assert!(matches!(
        result,
        Err(RunError::Plan(GraphError::UnknownGoal(_)))
    ));
    assert!(build.calls().is_empty());
}
