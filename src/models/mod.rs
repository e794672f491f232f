//! Domain models and API DTOs.

pub mod api_key;
pub mod report;
pub mod test_case;
pub mod test_run;

// Re-export commonly used types
pub use api_key::{ApiKey, ApiKeyRole, AuthenticatedCaller};
pub use report::{
    EnvironmentComparisonResponse, EnvironmentStats, ExecutionTrendResponse, FlakyTest,
    OverviewResponse, ReportQuery, StatusBreakdownResponse, StatusCount, TestAnalysisQuery,
    TestAnalysisResponse, TopFailingTest, TrendGranularity, TrendPoint,
};
pub use test_case::TestCaseSummary;
pub use test_run::{TestRun, TestRunStatus};
