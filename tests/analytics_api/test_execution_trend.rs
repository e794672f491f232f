//! Execution trend endpoint.

use chrono::Duration;
use serde_json::json;
use test_insights_lib::analytics::InMemoryStore;
use test_insights_lib::models::TestRunStatus;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_daily_buckets() {
    let store = InMemoryStore::new()
        .with_run(run(CASE_A, "ci", TestRunStatus::Pass, days_ago(1)))
        .with_run(run(CASE_A, "ci", TestRunStatus::Fail, days_ago(1) + Duration::hours(1)))
        .with_run(run(CASE_B, "ci", TestRunStatus::Blocked, days_ago(1) + Duration::hours(2)))
        .with_run(run(CASE_B, "ci", TestRunStatus::Pass, hours_ago(1)));
    let app = create_test_app(store).await;

    let (status, body) = get_report(&app, "execution-trend", "").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "trend": [
                {"date": "2025-05-31", "totalExecuted": 3, "passCount": 1, "failCount": 1, "passRate": 33},
                {"date": "2025-06-01", "totalExecuted": 1, "passCount": 1, "failCount": 0, "passRate": 100},
            ],
            "granularity": "day"
        })
    );
}

#[actix_rt::test]
async fn test_long_history_switches_to_weeks() {
    // 2025-06-01 is a Sunday; its week starts Monday 2025-05-26.
    let store = InMemoryStore::new()
        .with_run(run(CASE_A, "ci", TestRunStatus::Pass, days_ago(120)))
        .with_run(run(CASE_A, "ci", TestRunStatus::Fail, hours_ago(1)));
    let app = create_test_app(store).await;

    let (_, body) = get_report(&app, "execution-trend", "").await;
    assert_eq!(body["granularity"], "week");

    let dates: Vec<&str> = body["trend"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-01-27", "2025-05-26"]);
}

#[actix_rt::test]
async fn test_time_range_narrows_to_daily() {
    let store = InMemoryStore::new()
        .with_run(run(CASE_A, "ci", TestRunStatus::Pass, days_ago(120)))
        .with_run(run(CASE_A, "ci", TestRunStatus::Fail, hours_ago(1)));
    let app = create_test_app(store).await;

    let (_, body) = get_report(&app, "execution-trend", "timeRange=7d").await;
    assert_eq!(body["granularity"], "day");
    assert_eq!(body["trend"].as_array().unwrap().len(), 1);
    assert_eq!(body["trend"][0]["passRate"], 0);
}

#[actix_rt::test]
async fn test_empty_trend() {
    let app = create_test_app(InMemoryStore::new()).await;

    let (status, body) = get_report(&app, "execution-trend", "").await;
    assert_eq!(status, 200);
    assert_eq!(body["trend"], json!([]));
}
