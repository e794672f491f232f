//! Report request parameters and response bodies.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::TestRunStatus;

// ============================================================================
// Request parameters
// ============================================================================

/// Filter parameters shared by every report.
///
/// Values stay raw strings here; `ReportFilters::from_query` validates them.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// One of `24h`, `3d`, `7d`, `custom`, `all` (default `all`).
    pub time_range: Option<String>,
    /// Lower bound for `custom` (RFC 3339 or `YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Upper bound for `custom` (RFC 3339 or `YYYY-MM-DD`).
    pub date_to: Option<String>,
    /// One of `global`, `test-plan`, `test-suite` (default `global`).
    pub scope: Option<String>,
    /// Test plan or test suite UUID, required for non-global scope.
    pub scope_id: Option<String>,
}

/// Parameters for the test analysis report.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TestAnalysisQuery {
    #[serde(flatten)]
    pub filters: ReportQuery,
    /// `flaky` or `top-failing` (required).
    #[serde(rename = "type")]
    pub analysis_type: Option<String>,
    /// Maximum rows (default 10, max 50).
    pub limit: Option<String>,
}

// ============================================================================
// Status breakdown
// ============================================================================

/// Run count for one terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: TestRunStatus,
    pub count: u64,
    /// Share of all runs, 0-100.
    pub percentage: u32,
}

/// Status breakdown response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusBreakdownResponse {
    pub breakdown: Vec<StatusCount>,
    pub total: u64,
}

// ============================================================================
// Environment comparison
// ============================================================================

/// Run statistics for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentStats {
    pub environment: String,
    pub total_runs: u64,
    pub pass_count: u64,
    pub fail_count: u64,
    pub pass_rate: u32,
}

/// Environment comparison response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EnvironmentComparisonResponse {
    pub environments: Vec<EnvironmentStats>,
}

// ============================================================================
// Execution trend
// ============================================================================

/// Width of an execution trend bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrendGranularity {
    Day,
    Week,
}

/// One bucket of the execution trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Bucket key, `YYYY-MM-DD` (the Monday for weekly buckets).
    pub date: String,
    pub total_executed: u64,
    pub pass_count: u64,
    pub fail_count: u64,
    pub pass_rate: u32,
}

/// Execution trend response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ExecutionTrendResponse {
    pub trend: Vec<TrendPoint>,
    pub granularity: TrendGranularity,
}

// ============================================================================
// Test analysis
// ============================================================================

/// A test case that both passed and failed in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlakyTest {
    pub test_case_id: Uuid,
    pub test_case_name: String,
    pub total_runs: u64,
    pub pass_count: u64,
    pub fail_count: u64,
    pub flakiness_score: u32,
    pub debug_flag: bool,
    pub last_run_at: Option<DateTime<Utc>>,
}

/// A test case with at least one failure in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopFailingTest {
    pub test_case_id: Uuid,
    pub test_case_name: String,
    pub fail_count: u64,
    pub total_runs: u64,
    pub fail_rate: u32,
    pub debug_flag: bool,
    pub last_failed_at: Option<DateTime<Utc>>,
}

/// Test analysis response; row shape depends on the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TestAnalysisResponse {
    Flaky { tests: Vec<FlakyTest> },
    TopFailing { tests: Vec<TopFailingTest> },
}

impl TestAnalysisResponse {
    /// Number of ranked rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Flaky { tests } => tests.len(),
            Self::TopFailing { tests } => tests.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Overview
// ============================================================================

/// Status, trend and environment reports over one working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub status_breakdown: StatusBreakdownResponse,
    pub execution_trend: ExecutionTrendResponse,
    pub environment_comparison: EnvironmentComparisonResponse,
}
