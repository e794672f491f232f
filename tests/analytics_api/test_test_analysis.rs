//! Flaky and top-failing rankings.

use serde_json::json;
use test_insights_lib::analytics::InMemoryStore;
use test_insights_lib::models::TestRunStatus;
use uuid::Uuid;

use super::test_helpers::*;

/// A: 6 pass / 4 fail, B: 3 pass / 7 fail, C: 5 pass.
fn ranked_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_runs(runs(CASE_A, TestRunStatus::Pass, 6, days_ago(4)))
        .with_runs(runs(CASE_A, TestRunStatus::Fail, 4, days_ago(3)))
        .with_runs(runs(CASE_B, TestRunStatus::Pass, 3, days_ago(4)))
        .with_runs(runs(CASE_B, TestRunStatus::Fail, 7, days_ago(2)))
        .with_runs(runs(CASE_C, TestRunStatus::Pass, 5, days_ago(4)))
        .with_test_case(test_case(CASE_A, "login works", false))
        .with_test_case(test_case(CASE_B, "checkout works", true))
        .with_test_case(test_case(CASE_C, "search works", false))
}

#[actix_rt::test]
async fn test_flaky_ranking() {
    let app = create_test_app(ranked_store()).await;

    let (status, body) = get_report(&app, "test-analysis", "type=flaky").await;
    assert_eq!(status, 200);

    let tests = body["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 2);

    assert_eq!(tests[0]["testCaseId"], CASE_B.to_string());
    assert_eq!(tests[0]["testCaseName"], "checkout works");
    assert_eq!(tests[0]["flakinessScore"], 70);
    assert_eq!(tests[0]["passCount"], 3);
    assert_eq!(tests[0]["failCount"], 7);
    assert_eq!(tests[0]["totalRuns"], 10);
    assert_eq!(tests[0]["debugFlag"], true);
    assert_eq!(tests[0]["lastRunAt"], "2025-06-01T11:00:00Z");

    assert_eq!(tests[1]["testCaseId"], CASE_A.to_string());
    assert_eq!(tests[1]["flakinessScore"], 40);
}

#[actix_rt::test]
async fn test_top_failing_ranking() {
    let app = create_test_app(ranked_store()).await;

    let (status, body) = get_report(&app, "test-analysis", "type=top-failing").await;
    assert_eq!(status, 200);

    let tests = body["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0]["testCaseId"], CASE_B.to_string());
    assert_eq!(tests[0]["failCount"], 7);
    assert_eq!(tests[0]["failRate"], 70);
    // Seven failures spaced an hour apart starting two days ago.
    assert_eq!(tests[0]["lastFailedAt"], "2025-05-30T18:00:00Z");
    assert_eq!(tests[1]["testCaseId"], CASE_A.to_string());
    assert_eq!(tests[1]["failCount"], 4);
    assert!(tests[1].get("flakinessScore").is_none());
}

#[actix_rt::test]
async fn test_time_range_applies_to_rankings() {
    let app = create_test_app(ranked_store()).await;

    // Only failures fall inside the last three days, so nothing is flaky.
    let (_, body) = get_report(&app, "test-analysis", "type=flaky&timeRange=3d").await;
    assert_eq!(body, json!({"tests": []}));

    let (_, body) = get_report(&app, "test-analysis", "type=top-failing&timeRange=3d").await;
    assert_eq!(body["tests"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_limit_handling() {
    let app = create_test_app(ranked_store()).await;

    let (_, body) = get_report(&app, "test-analysis", "type=flaky&limit=1").await;
    assert_eq!(body["tests"].as_array().unwrap().len(), 1);
    assert_eq!(body["tests"][0]["testCaseId"], CASE_B.to_string());

    for limit in [
        "0",
        "-5",
        "1000",
        "9223372036854775808",
        "99999999999999999999",
        "-99999999999999999999",
    ] {
        let (status, body) =
            get_report(&app, "test-analysis", &format!("type=flaky&limit={}", limit)).await;
        assert_eq!(status, 200, "limit={}", limit);
        assert_eq!(body["tests"].as_array().unwrap().len(), 2, "limit={}", limit);
    }

    let (status, body) = get_report(&app, "test-analysis", "type=flaky&limit=ten").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_limit_caps_at_fifty() {
    let mut store = InMemoryStore::new();
    for n in 0..60u128 {
        let case = Uuid::from_u128(0x1000 + n);
        store = store
            .with_run(run(case, "ci", TestRunStatus::Fail, hours_ago(2)))
            .with_run(run(case, "ci", TestRunStatus::Pass, hours_ago(1)));
    }
    let app = create_test_app(store).await;

    let (_, body) = get_report(&app, "test-analysis", "type=top-failing&limit=1000").await;
    let tests = body["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 50);
    // Equal failure counts fall back to id order.
    assert_eq!(tests[0]["testCaseId"], Uuid::from_u128(0x1000).to_string());
    assert_eq!(tests[49]["testCaseId"], Uuid::from_u128(0x1000 + 49).to_string());
}

#[actix_rt::test]
async fn test_type_is_required() {
    let app = create_test_app(ranked_store()).await;

    for query in ["", "type=slowest", "type=FLAKY"] {
        let (status, body) = get_report(&app, "test-analysis", query).await;
        assert_eq!(status, 400, "{}", query);
        assert_eq!(body["error"], "INVALID_INPUT", "{}", query);
    }
}

#[actix_rt::test]
async fn test_deleted_test_case_uses_fallbacks() {
    let ghost = Uuid::from_u128(0xDEAD);
    let store = InMemoryStore::new()
        .with_run(run(ghost, "ci", TestRunStatus::Pass, hours_ago(3)))
        .with_run(run(ghost, "ci", TestRunStatus::Fail, hours_ago(2)));
    let app = create_test_app(store).await;

    let (_, body) = get_report(&app, "test-analysis", "type=flaky").await;
    assert_eq!(
        body["tests"],
        json!([{
            "testCaseId": ghost.to_string(),
            "testCaseName": "Unknown",
            "totalRuns": 2,
            "passCount": 1,
            "failCount": 1,
            "flakinessScore": 50,
            "debugFlag": false,
            "lastRunAt": null,
        }])
    );
}
