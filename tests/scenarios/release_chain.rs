//! Test: the full release chain with a mock toolchain

use crate::helpers::*;

#[tokio::test]
async fn test_pack_goal_restores_compiles_and_packs() {
    let build = test_build(MockTools::new());
    let report = run_goal(&build, "pack").await.unwrap();

    assert_calls(
        &build,
        &[
            "restore",
            "compile Release 0.3.0-beta2",
            "pack 0.3.0-beta2",
        ],
    );
    assert_eq!(report.goal, "pack");
    let executed: Vec<_> = report.steps.iter().map(|s| s.step.as_str()).collect();
    assert_eq!(executed, vec!["clean", "restore", "compile", "pack"]);
}

#[tokio::test]
async fn test_push_goal_uploads_only_non_symbols_packages() {
    let build = test_build(MockTools::new());
    run_goal(&build, "push").await.unwrap();

    // Pack wrote both the package and its symbols package; push skips the
    // symbols one
    assert_calls(
        &build,
        &[
            "restore",
            "compile Release 0.3.0-beta2",
            "pack 0.3.0-beta2",
            "push Foo.Common.0.3.0-beta2.nupkg",
        ],
    );
}

#[tokio::test]
async fn test_push_uploads_every_package_in_name_order() {
    let tools = MockTools::new().writing_packages(vec![
        "Zeta.1.0.0.nupkg",
        "Alpha.1.0.0.nupkg",
        "Alpha.1.0.0.symbols.nupkg",
    ]);
    let build = test_build(tools);
    run_goal(&build, "push").await.unwrap();

    let calls = build.calls();
    let pushes: Vec<_> = calls.iter().filter(|c| c.starts_with("push")).collect();
    assert_eq!(pushes, vec!["push Alpha.1.0.0.nupkg", "push Zeta.1.0.0.nupkg"]);
}

#[tokio::test]
async fn test_clean_leaves_the_output_directory_empty_before_pack() {
    let build = test_build(MockTools::new());

    // Seed a stale artifact from a previous run
    std::fs::create_dir_all(build.package_output_dir()).unwrap();
    std::fs::write(build.package_output_dir().join("stale.nupkg"), b"old").unwrap();

    run_goal(&build, "pack").await.unwrap();

    let remaining: Vec<_> = std::fs::read_dir(build.package_output_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert!(
        !remaining.contains(&"stale.nupkg".to_string()),
        "clean should have removed the stale artifact, found: {remaining:?}"
    );
}

#[tokio::test]
async fn test_goal_runs_are_repeatable() {
    let build = test_build(MockTools::new());

    run_goal(&build, "pack").await.unwrap();
    run_goal(&build, "pack").await.unwrap();

    // Two full chains, no step ran twice within one run
    assert_eq!(build.calls().len(), 6);
}
