//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Test Insights Server",
        version = "0.1.0",
        description = "Read-only analytics over test-run history: status breakdown, execution trend, environment comparison and flaky / top-failing test rankings"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Report endpoints
        api::reports::status_breakdown,
        api::reports::execution_trend,
        api::reports::environment_comparison,
        api::reports::test_analysis,
        api::reports::overview,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Reports
            models::TestRunStatus,
            models::StatusCount,
            models::StatusBreakdownResponse,
            models::TrendGranularity,
            models::TrendPoint,
            models::ExecutionTrendResponse,
            models::EnvironmentStats,
            models::EnvironmentComparisonResponse,
            models::FlakyTest,
            models::TopFailingTest,
            models::TestAnalysisResponse,
            models::OverviewResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Reports", description = "Project test-run analytics")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add API key security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new("X-API-Key"),
                    ),
                ),
            );
        }
    }
}
