//! Shared fixtures for the report API tests.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use test_insights_lib::analytics::{FixedClock, InMemoryStore, ReportService};
use test_insights_lib::api;
use test_insights_lib::auth::AdminKey;
use test_insights_lib::middleware::RequestLogger;
use test_insights_lib::models::{TestCaseSummary, TestRun, TestRunStatus};

pub const TEST_ADMIN_KEY: &str = "test-admin-key-for-report-api";

/// Project every fixture run belongs to unless stated otherwise.
pub const PROJECT: Uuid = Uuid::from_u128(0x0100);
pub const OTHER_PROJECT: Uuid = Uuid::from_u128(0x0200);

pub const CASE_A: Uuid = Uuid::from_u128(0x0A);
pub const CASE_B: Uuid = Uuid::from_u128(0x0B);
pub const CASE_C: Uuid = Uuid::from_u128(0x0C);

/// Instant the fixed clock reports.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    now() - Duration::hours(hours)
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub fn run(
    test_case_id: Uuid,
    environment: &str,
    status: TestRunStatus,
    executed_at: DateTime<Utc>,
) -> TestRun {
    TestRun {
        id: Uuid::now_v7(),
        project_id: PROJECT,
        test_case_id,
        environment: environment.to_string(),
        status,
        executed_at,
        duration: Some(30),
        notes: None,
    }
}

/// `count` runs of one case with the same status, one hour apart.
pub fn runs(
    test_case_id: Uuid,
    status: TestRunStatus,
    count: usize,
    start: DateTime<Utc>,
) -> Vec<TestRun> {
    (0..count)
        .map(|i| run(test_case_id, "ci", status, start + Duration::hours(i as i64)))
        .collect()
}

pub fn test_case(id: Uuid, name: &str, debug_flag: bool) -> TestCaseSummary {
    TestCaseSummary {
        id,
        name: name.to_string(),
        debug_flag,
        last_run_at: Some(hours_ago(1)),
    }
}

/// Create the test app around an in-memory store.
pub async fn create_test_app(
    store: InMemoryStore,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let store = Arc::new(store);
    let service = ReportService::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(FixedClock(now())),
    );

    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(AdminKey::new(Some(TEST_ADMIN_KEY.to_string()))))
            .app_data(web::Data::new(service))
            .service(web::scope("/api/v1").configure(api::configure_routes)),
    )
    .await
}

/// Report URI for the fixture project.
pub fn report_uri(report: &str, query: &str) -> String {
    if query.is_empty() {
        format!("/api/v1/projects/{}/reports/{}", PROJECT, report)
    } else {
        format!("/api/v1/projects/{}/reports/{}?{}", PROJECT, report, query)
    }
}

/// GET a URI as the bootstrap admin.
pub async fn get_as_admin<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// GET a report of the fixture project as the bootstrap admin.
pub async fn get_report<S>(app: &S, report: &str, query: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    get_as_admin(app, &report_uri(report, query)).await
}
