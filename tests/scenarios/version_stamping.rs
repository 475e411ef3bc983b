//! Test: version metadata flows into compile stamps and the pack version

use crate::helpers::*;

#[tokio::test]
async fn test_release_point_packs_the_clean_version() {
    let build = test_build(MockTools::with_version("0.3.0-beta", "0"));
    run_goal(&build, "pack").await.unwrap();

    assert_calls(
        &build,
        &["restore", "compile Release 0.3.0-beta", "pack 0.3.0-beta"],
    );
}

#[tokio::test]
async fn test_commit_distance_is_appended_to_the_pack_version() {
    let build = test_build(MockTools::with_version("0.3.0-beta", "2"));
    run_goal(&build, "pack").await.unwrap();

    let calls = build.calls();
    assert_eq!(calls.last().map(String::as_str), Some("pack 0.3.0-beta2"));
}

#[tokio::test]
async fn test_malformed_commit_count_degrades_to_release_point() {
    let build = test_build(MockTools::with_version("1.2.3", "not-a-number"));
    run_goal(&build, "pack").await.unwrap();

    let calls = build.calls();
    assert_eq!(calls.last().map(String::as_str), Some("pack 1.2.3"));
}

#[tokio::test]
async fn test_compile_receives_the_informational_version() {
    let build = test_build(MockTools::with_version("1.2.3-rc", "5"));
    run_goal(&build, "compile").await.unwrap();

    assert_calls(&build, &["restore", "compile Release 1.2.3-rc5"]);
}
