//! Environment comparison endpoint.

use serde_json::json;
use test_insights_lib::analytics::InMemoryStore;
use test_insights_lib::models::TestRunStatus;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_environments_sorted_with_pass_rates() {
    let mut store = InMemoryStore::new();
    for i in 0..5 {
        let status = if i < 4 {
            TestRunStatus::Pass
        } else {
            TestRunStatus::Fail
        };
        store = store.with_run(run(CASE_A, "staging", status, hours_ago(10 - i)));
    }
    store = store
        .with_run(run(CASE_A, "production", TestRunStatus::Pass, hours_ago(2)))
        .with_run(run(CASE_B, "production", TestRunStatus::Pass, hours_ago(1)));
    let app = create_test_app(store).await;

    let (status, body) = get_report(&app, "environment-comparison", "").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "environments": [
                {"environment": "production", "totalRuns": 2, "passCount": 2, "failCount": 0, "passRate": 100},
                {"environment": "staging", "totalRuns": 5, "passCount": 4, "failCount": 1, "passRate": 80},
            ]
        })
    );
}

#[actix_rt::test]
async fn test_environment_without_passes_or_failures() {
    let store = InMemoryStore::new()
        .with_run(run(CASE_A, "qa", TestRunStatus::Skipped, hours_ago(2)))
        .with_run(run(CASE_A, "qa", TestRunStatus::Blocked, hours_ago(1)));
    let app = create_test_app(store).await;

    let (_, body) = get_report(&app, "environment-comparison", "").await;
    assert_eq!(
        body["environments"],
        json!([{"environment": "qa", "totalRuns": 2, "passCount": 0, "failCount": 0, "passRate": 0}])
    );
}
