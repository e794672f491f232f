//! Test run domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Execution status of a test run.
///
/// Variant order is the canonical reporting order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestRunStatus {
    NotRun,
    InProgress,
    Pass,
    Fail,
    Blocked,
    Skipped,
}

impl TestRunStatus {
    /// Statuses that never appear in a report.
    pub const NON_TERMINAL: [TestRunStatus; 2] = [Self::NotRun, Self::InProgress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRun => "NOT_RUN",
            Self::InProgress => "IN_PROGRESS",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Blocked => "BLOCKED",
            Self::Skipped => "SKIPPED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NOT_RUN" => Some(Self::NotRun),
            "IN_PROGRESS" => Some(Self::InProgress),
            "PASS" => Some(Self::Pass),
            "FAIL" => Some(Self::Fail),
            "BLOCKED" => Some(Self::Blocked),
            "SKIPPED" => Some(Self::Skipped),
            _ => None,
        }
    }

    /// Terminal runs are the only ones reports look at.
    pub fn is_terminal(&self) -> bool {
        !Self::NON_TERMINAL.contains(self)
    }
}

impl std::fmt::Display for TestRunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single execution of a test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub id: Uuid,
    pub project_id: Uuid,
    pub test_case_id: Uuid,
    /// Free-text environment label (e.g. "staging").
    pub environment: String,
    pub status: TestRunStatus,
    pub executed_at: DateTime<Utc>,
    /// Duration in seconds.
    pub duration: Option<i32>,
    pub notes: Option<String>,
}
