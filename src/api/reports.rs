//! Report API endpoints.
//!
//! Handlers only authenticate, parse the project id and hand the raw query
//! to [`ReportService`]; validation and authorization live there.

use actix_web::{HttpResponse, get, web};
use uuid::Uuid;

use crate::analytics::ReportService;
use crate::auth::ApiKeyAuth;
use crate::error::{AppError, AppResult};
use crate::models::{ReportQuery, TestAnalysisQuery};

/// Configure report routes.
///
/// Query strings that fail to deserialize surface as `INVALID_INPUT`.
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::InvalidInput(err.to_string()).into()
    }))
    .service(status_breakdown)
    .service(execution_trend)
    .service(environment_comparison)
    .service(test_analysis)
    .service(overview);
}

fn project_id(path: web::Path<String>) -> AppResult<Uuid> {
    let raw = path.into_inner();
    Uuid::parse_str(&raw)
        .map_err(|_| AppError::InvalidInput(format!("projectId is not a UUID: '{}'", raw)))
}

/// Status breakdown of terminal runs.
///
/// GET /projects/{projectId}/reports/status-breakdown
#[utoipa::path(
    get,
    path = "/api/v1/projects/{projectId}/reports/status-breakdown",
    tag = "Reports",
    params(
        ("projectId" = String, Path, description = "Project UUID"),
        ("timeRange" = Option<String>, Query, description = "24h, 3d, 7d, custom or all (default: all)"),
        ("dateFrom" = Option<String>, Query, description = "Custom range start (YYYY-MM-DD or RFC 3339)"),
        ("dateTo" = Option<String>, Query, description = "Custom range end (YYYY-MM-DD or RFC 3339)"),
        ("scope" = Option<String>, Query, description = "global, test-plan or test-suite (default: global)"),
        ("scopeId" = Option<String>, Query, description = "Test plan or test suite UUID")
    ),
    responses(
        (status = 200, description = "Run counts per status", body = crate::models::StatusBreakdownResponse),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = crate::error::ErrorResponse),
        (status = 403, description = "No access to project", body = crate::error::ErrorResponse)
    ),
    security(("api_key" = []))
)]
#[get("/projects/{projectId}/reports/status-breakdown")]
pub async fn status_breakdown(
    auth: ApiKeyAuth,
    service: web::Data<ReportService>,
    path: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> AppResult<HttpResponse> {
    let project_id = project_id(path)?;
    let report = service
        .status_breakdown(&auth.caller, project_id, &query)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Executions per day or ISO week.
///
/// GET /projects/{projectId}/reports/execution-trend
#[utoipa::path(
    get,
    path = "/api/v1/projects/{projectId}/reports/execution-trend",
    tag = "Reports",
    params(
        ("projectId" = String, Path, description = "Project UUID"),
        ("timeRange" = Option<String>, Query, description = "24h, 3d, 7d, custom or all (default: all)"),
        ("dateFrom" = Option<String>, Query, description = "Custom range start"),
        ("dateTo" = Option<String>, Query, description = "Custom range end"),
        ("scope" = Option<String>, Query, description = "global, test-plan or test-suite"),
        ("scopeId" = Option<String>, Query, description = "Test plan or test suite UUID")
    ),
    responses(
        (status = 200, description = "Execution trend", body = crate::models::ExecutionTrendResponse),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse),
        (status = 403, description = "No access to project", body = crate::error::ErrorResponse)
    ),
    security(("api_key" = []))
)]
#[get("/projects/{projectId}/reports/execution-trend")]
pub async fn execution_trend(
    auth: ApiKeyAuth,
    service: web::Data<ReportService>,
    path: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> AppResult<HttpResponse> {
    let project_id = project_id(path)?;
    let report = service
        .execution_trend(&auth.caller, project_id, &query)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Pass rates per environment.
///
/// GET /projects/{projectId}/reports/environment-comparison
#[utoipa::path(
    get,
    path = "/api/v1/projects/{projectId}/reports/environment-comparison",
    tag = "Reports",
    params(
        ("projectId" = String, Path, description = "Project UUID"),
        ("timeRange" = Option<String>, Query, description = "24h, 3d, 7d, custom or all (default: all)"),
        ("dateFrom" = Option<String>, Query, description = "Custom range start"),
        ("dateTo" = Option<String>, Query, description = "Custom range end"),
        ("scope" = Option<String>, Query, description = "global, test-plan or test-suite"),
        ("scopeId" = Option<String>, Query, description = "Test plan or test suite UUID")
    ),
    responses(
        (status = 200, description = "Environment comparison", body = crate::models::EnvironmentComparisonResponse),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse),
        (status = 403, description = "No access to project", body = crate::error::ErrorResponse)
    ),
    security(("api_key" = []))
)]
#[get("/projects/{projectId}/reports/environment-comparison")]
pub async fn environment_comparison(
    auth: ApiKeyAuth,
    service: web::Data<ReportService>,
    path: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> AppResult<HttpResponse> {
    let project_id = project_id(path)?;
    let report = service
        .environment_comparison(&auth.caller, project_id, &query)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Flaky or top-failing test cases.
///
/// GET /projects/{projectId}/reports/test-analysis?type=flaky&limit=10
#[utoipa::path(
    get,
    path = "/api/v1/projects/{projectId}/reports/test-analysis",
    tag = "Reports",
    params(
        ("projectId" = String, Path, description = "Project UUID"),
        ("type" = String, Query, description = "flaky or top-failing"),
        ("limit" = Option<i64>, Query, description = "Rows to return (default: 10, max: 50)"),
        ("timeRange" = Option<String>, Query, description = "24h, 3d, 7d, custom or all (default: all)"),
        ("dateFrom" = Option<String>, Query, description = "Custom range start"),
        ("dateTo" = Option<String>, Query, description = "Custom range end"),
        ("scope" = Option<String>, Query, description = "global, test-plan or test-suite"),
        ("scopeId" = Option<String>, Query, description = "Test plan or test suite UUID")
    ),
    responses(
        (status = 200, description = "Ranked test cases", body = crate::models::TestAnalysisResponse),
        (status = 400, description = "Missing or invalid type, limit or filter", body = crate::error::ErrorResponse),
        (status = 403, description = "No access to project", body = crate::error::ErrorResponse)
    ),
    security(("api_key" = []))
)]
#[get("/projects/{projectId}/reports/test-analysis")]
pub async fn test_analysis(
    auth: ApiKeyAuth,
    service: web::Data<ReportService>,
    path: web::Path<String>,
    query: web::Query<TestAnalysisQuery>,
) -> AppResult<HttpResponse> {
    let project_id = project_id(path)?;
    let report = service
        .test_analysis(&auth.caller, project_id, &query)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Status breakdown, execution trend and environment comparison in one call.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{projectId}/reports/overview",
    tag = "Reports",
    params(
        ("projectId" = String, Path, description = "Project UUID"),
        ("timeRange" = Option<String>, Query, description = "24h, 3d, 7d, custom or all (default: all)"),
        ("dateFrom" = Option<String>, Query, description = "Custom range start"),
        ("dateTo" = Option<String>, Query, description = "Custom range end"),
        ("scope" = Option<String>, Query, description = "global, test-plan or test-suite"),
        ("scopeId" = Option<String>, Query, description = "Test plan or test suite UUID")
    ),
    responses(
        (status = 200, description = "Combined reports", body = crate::models::OverviewResponse),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse),
        (status = 403, description = "No access to project", body = crate::error::ErrorResponse)
    ),
    security(("api_key" = []))
)]
#[get("/projects/{projectId}/reports/overview")]
pub async fn overview(
    auth: ApiKeyAuth,
    service: web::Data<ReportService>,
    path: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> AppResult<HttpResponse> {
    let project_id = project_id(path)?;
    let report = service.overview(&auth.caller, project_id, &query).await?;
    Ok(HttpResponse::Ok().json(report))
}
