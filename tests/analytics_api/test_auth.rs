//! Authentication, path validation and ambient endpoints.

use actix_web::test;
use serde_json::Value;
use test_insights_lib::analytics::InMemoryStore;
use test_insights_lib::models::TestRunStatus;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_missing_credentials_rejected() {
    let app = create_test_app(InMemoryStore::new()).await;

    let req = test::TestRequest::get()
        .uri(&report_uri("status-breakdown", ""))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_rt::test]
async fn test_wrong_admin_key_rejected() {
    let app = create_test_app(InMemoryStore::new()).await;

    let req = test::TestRequest::get()
        .uri(&report_uri("overview", ""))
        .insert_header(("X-Admin-Key", "not-the-admin-key"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_rt::test]
async fn test_api_key_without_database_rejected() {
    let app = create_test_app(InMemoryStore::new()).await;

    let req = test::TestRequest::get()
        .uri(&report_uri("overview", ""))
        .insert_header(("X-API-Key", "tsi_0123456789abcdef"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_rt::test]
async fn test_non_uuid_project_is_invalid_input() {
    let app = create_test_app(InMemoryStore::new()).await;

    let (status, body) =
        get_as_admin(&app, "/api/v1/projects/not-a-uuid/reports/status-breakdown").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_admin_sees_any_project() {
    let store = InMemoryStore::new().with_run(run(CASE_A, "ci", TestRunStatus::Pass, hours_ago(1)));
    let app = create_test_app(store).await;

    let (status, body) = get_report(&app, "status-breakdown", "").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 1);
}

#[actix_rt::test]
async fn test_request_id_header_set() {
    let app = create_test_app(InMemoryStore::new()).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert!(request_id.is_some_and(|id| uuid::Uuid::parse_str(&id).is_ok()));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn test_ready_without_database_is_unavailable() {
    let app = create_test_app(InMemoryStore::new()).await;

    let req = test::TestRequest::get().uri("/api/v1/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_READY");
}
