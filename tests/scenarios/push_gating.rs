//! Test: push requirements gate the run before any step body executes

use crate::helpers::*;
use packline::core::{Configuration, StepError};
use packline::execution::RunError;

#[tokio::test]
async fn test_missing_api_key_fails_before_any_step_runs() {
    let build = test_build_with(MockTools::new(), |config| {
        config.nuget_api_key = None;
    });

    let result = run_goal(&build, "push").await;

    match result {
        Err(RunError::RequirementNotMet { step, requirement }) => {
            assert_eq!(step, "push");
            assert_eq!(requirement, "NugetApiKey");
        }
        other => panic!("expected requirement failure, got {other:?}"),
    }

    // A missing credential is a configuration error; nothing was restored,
    // compiled or packed before it was reported
    assert!(build.calls().is_empty());
}

#[tokio::test]
async fn test_empty_api_key_is_treated_as_missing() {
    let build = test_build_with(MockTools::new(), |config| {
        config.nuget_api_key = Some(String::new());
    });

    let result = run_goal(&build, "push").await;
    assert!(matches!(
        result,
        Err(RunError::RequirementNotMet { ref requirement, .. }) if requirement == "NugetApiKey"
    ));
}

#[tokio::test]
async fn test_debug_configuration_cannot_push() {
    let build = test_build_with(MockTools::new(), |config| {
        config.configuration = Configuration::Debug;
    });

    let result = run_goal(&build, "push").await;
    assert!(matches!(
        result,
        Err(RunError::RequirementNotMet { ref requirement, .. })
            if requirement == "Configuration == Release"
    ));
    assert!(build.calls().is_empty());
}

#[tokio::test]
async fn test_empty_registry_url_cannot_push() {
    let build = test_build_with(MockTools::new(), |config| {
        config.nuget_api_url = String::new();
    });

    let result = run_goal(&build, "push").await;
    assert!(matches!(
        result,
        Err(RunError::RequirementNotMet { ref requirement, .. }) if requirement == "NugetApiUrl"
    ));
}

#[tokio::test]
async fn test_push_with_no_packable_artifacts_fails() {
    // Pack produces only a symbols package; push finds nothing to upload
    let tools = MockTools::new().writing_packages(vec!["Foo.Common.0.3.0-beta2.symbols.nupkg"]);
    let build = test_build(tools);

    let result = run_goal(&build, "push").await;

    match result {
        Err(RunError::StepFailed { step, source }) => {
            assert_eq!(step, "push");
            assert!(matches!(source, StepError::MissingArtifacts(_)));
        }
        other => panic!("expected push to fail on missing artifacts, got {other:?}"),
    }
}
