//! Overview endpoint.

use test_insights_lib::analytics::InMemoryStore;
use test_insights_lib::models::TestRunStatus;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_overview_matches_individual_reports() {
    let store = InMemoryStore::new()
        .with_run(run(CASE_A, "staging", TestRunStatus::Pass, days_ago(3)))
        .with_run(run(CASE_A, "staging", TestRunStatus::Fail, days_ago(2)))
        .with_run(run(CASE_B, "production", TestRunStatus::Pass, hours_ago(1)));
    let app = create_test_app(store).await;

    let (status, overview) = get_report(&app, "overview", "timeRange=7d").await;
    assert_eq!(status, 200);

    let (_, breakdown) = get_report(&app, "status-breakdown", "timeRange=7d").await;
    let (_, trend) = get_report(&app, "execution-trend", "timeRange=7d").await;
    let (_, environments) = get_report(&app, "environment-comparison", "timeRange=7d").await;

    assert_eq!(overview["statusBreakdown"], breakdown);
    assert_eq!(overview["executionTrend"], trend);
    assert_eq!(overview["environmentComparison"], environments);
}

#[actix_rt::test]
async fn test_overview_validates_filters() {
    let app = create_test_app(InMemoryStore::new()).await;

    let (status, body) =
        get_report(&app, "overview", "timeRange=custom&dateFrom=2025-13-01").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}
