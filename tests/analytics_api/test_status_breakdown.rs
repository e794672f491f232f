//! Status breakdown endpoint and the shared time / scope filters.

use serde_json::json;
use test_insights_lib::analytics::InMemoryStore;
use test_insights_lib::models::{TestRun, TestRunStatus};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_breakdown_shares_and_order() {
    let store = InMemoryStore::new()
        .with_run(run(CASE_A, "ci", TestRunStatus::Blocked, hours_ago(5)))
        .with_run(run(CASE_A, "ci", TestRunStatus::Pass, hours_ago(4)))
        .with_run(run(CASE_A, "ci", TestRunStatus::Fail, hours_ago(3)))
        .with_run(run(CASE_B, "ci", TestRunStatus::Pass, hours_ago(2)))
        .with_run(run(CASE_C, "ci", TestRunStatus::Pass, hours_ago(1)));
    let app = create_test_app(store).await;

    let (status, body) = get_report(&app, "status-breakdown", "").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "breakdown": [
                {"status": "PASS", "count": 3, "percentage": 60},
                {"status": "FAIL", "count": 1, "percentage": 20},
                {"status": "BLOCKED", "count": 1, "percentage": 20},
            ],
            "total": 5
        })
    );
}

#[actix_rt::test]
async fn test_non_terminal_and_foreign_runs_excluded() {
    let mut foreign = run(CASE_A, "ci", TestRunStatus::Fail, hours_ago(1));
    foreign.project_id = OTHER_PROJECT;

    let store = InMemoryStore::new()
        .with_run(run(CASE_A, "ci", TestRunStatus::Pass, hours_ago(3)))
        .with_run(run(CASE_A, "ci", TestRunStatus::NotRun, hours_ago(2)))
        .with_run(run(CASE_B, "ci", TestRunStatus::InProgress, hours_ago(2)))
        .with_run(foreign);
    let app = create_test_app(store).await;

    let (_, body) = get_report(&app, "status-breakdown", "").await;
    assert_eq!(body["total"], 1);
    assert_eq!(
        body["breakdown"],
        json!([{"status": "PASS", "count": 1, "percentage": 100}])
    );
}

#[actix_rt::test]
async fn test_empty_project() {
    let app = create_test_app(InMemoryStore::new()).await;

    let (status, body) = get_report(&app, "status-breakdown", "timeRange=7d").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"breakdown": [], "total": 0}));
}

fn timeline() -> Vec<TestRun> {
    vec![
        run(CASE_A, "ci", TestRunStatus::Pass, hours_ago(2)),
        run(CASE_A, "ci", TestRunStatus::Pass, days_ago(2)),
        run(CASE_A, "ci", TestRunStatus::Fail, days_ago(5)),
        run(CASE_A, "ci", TestRunStatus::Fail, days_ago(10)),
    ]
}

#[actix_rt::test]
async fn test_relative_time_ranges() {
    let app = create_test_app(InMemoryStore::new().with_runs(timeline())).await;

    for (query, expected) in [
        ("timeRange=24h", 1),
        ("timeRange=3d", 2),
        ("timeRange=7d", 3),
        ("timeRange=all", 4),
        ("", 4),
    ] {
        let (status, body) = get_report(&app, "status-breakdown", query).await;
        assert_eq!(status, 200, "{}", query);
        assert_eq!(body["total"], expected, "{}", query);
    }
}

#[actix_rt::test]
async fn test_custom_range_with_date_only_bounds() {
    let app = create_test_app(InMemoryStore::new().with_runs(timeline())).await;

    // 2025-05-25 .. 2025-05-30 covers the 5-day-old and 2-day-old runs.
    let (status, body) = get_report(
        &app,
        "status-breakdown",
        "timeRange=custom&dateFrom=2025-05-25&dateTo=2025-05-30",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 2);

    let (_, body) = get_report(
        &app,
        "status-breakdown",
        "timeRange=custom&dateFrom=2025-05-25T00:00:00Z",
    )
    .await;
    assert_eq!(body["total"], 3);
}

#[actix_rt::test]
async fn test_permissive_fallbacks() {
    let app = create_test_app(InMemoryStore::new().with_runs(timeline())).await;

    for query in [
        "timeRange=1y",
        "timeRange=custom",
        "timeRange=custom&dateTo=2025-05-20",
        "scope=test-plan",
        "scope=everything&scopeId=00000000-0000-0000-0000-000000000001",
        "timeRange=all&dateFrom=yesterday",
        "dateFrom=garbage&dateTo=31/05/2025",
    ] {
        let (status, body) = get_report(&app, "status-breakdown", query).await;
        assert_eq!(status, 200, "{}", query);
        assert_eq!(body["total"], 4, "{}", query);
    }
}

#[actix_rt::test]
async fn test_malformed_filters_rejected() {
    let app = create_test_app(InMemoryStore::new().with_runs(timeline())).await;

    for query in [
        "timeRange=custom&dateFrom=yesterday",
        "timeRange=custom&dateFrom=2025-05-01&dateTo=31/05/2025",
        "scope=test-suite&scopeId=suite-42",
    ] {
        let (status, body) = get_report(&app, "status-breakdown", query).await;
        assert_eq!(status, 400, "{}", query);
        assert_eq!(body["error"], "INVALID_INPUT", "{}", query);
    }
}

#[actix_rt::test]
async fn test_plan_and_suite_scopes() {
    let plan = uuid::Uuid::from_u128(0xF1);
    let suite = uuid::Uuid::from_u128(0xF2);

    let store = InMemoryStore::new()
        .with_run(run(CASE_A, "ci", TestRunStatus::Pass, hours_ago(3)))
        .with_run(run(CASE_B, "ci", TestRunStatus::Fail, hours_ago(2)))
        .with_run(run(CASE_C, "ci", TestRunStatus::Skipped, hours_ago(1)))
        .link_plan(plan, CASE_A)
        .link_plan(plan, CASE_B)
        .link_suite(suite, CASE_C);
    let app = create_test_app(store).await;

    let (_, body) =
        get_report(&app, "status-breakdown", &format!("scope=test-plan&scopeId={}", plan)).await;
    assert_eq!(body["total"], 2);

    let (_, body) =
        get_report(&app, "status-breakdown", &format!("scope=test-suite&scopeId={}", suite)).await;
    assert_eq!(
        body["breakdown"],
        json!([{"status": "SKIPPED", "count": 1, "percentage": 100}])
    );

    // A plan id used as a suite id links nothing.
    let (_, body) =
        get_report(&app, "status-breakdown", &format!("scope=test-suite&scopeId={}", plan)).await;
    assert_eq!(body["total"], 0);
}
