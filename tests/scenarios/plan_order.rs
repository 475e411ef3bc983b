//! Test: resolved execution plans for the standard step set

use packline::core::GraphError;
use packline::execution::{standard_graph, DEFAULT_GOAL};

#[test]
fn test_push_plan_is_the_full_release_chain() {
    let plan = standard_graph().unwrap().plan("push").unwrap();
    assert_eq!(
        plan.steps(),
        &["clean", "restore", "compile", "pack", "push"]
    );
}

#[test]
fn test_default_goal_plan_stops_at_pack() {
    let plan = standard_graph().unwrap().plan(DEFAULT_GOAL).unwrap();
    assert_eq!(plan.steps(), &["clean", "restore", "compile", "pack"]);
}

#[test]
fn test_each_step_appears_at_most_once() {
    let plan = standard_graph().unwrap().plan("push").unwrap();
    for step in plan.steps() {
        let occurrences = plan.steps().iter().filter(|s| *s == step).count();
        assert_eq!(occurrences, 1, "step '{step}' appears {occurrences} times");
    }
}

#[test]
fn test_clean_ordered_only_by_its_before_edge() {
    let graph = standard_graph().unwrap();

    // clean declares no dependencies of its own
    assert!(graph.step("clean").unwrap().depends_on.is_empty());

    // yet every plan that includes restore runs clean first
    let plan = graph.plan("restore").unwrap();
    assert_eq!(plan.steps(), &["clean", "restore"]);

    // and a clean-only plan is just clean
    let plan = graph.plan("clean").unwrap();
    assert_eq!(plan.steps(), &["clean"]);
}

#[test]
fn test_unknown_goal_is_rejected() {
    let result = standard_graph().unwrap().plan("deploy");
    assert_eq!(result, Err(GraphError::UnknownGoal("deploy".to_string())));
}
