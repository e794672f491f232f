//! Collaborator seams the reporting engine reads through.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::RunFilter;
use crate::error::AppResult;
use crate::models::{AuthenticatedCaller, TestCaseSummary, TestRun};

/// Read access to test-run history.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// All runs matching `filter`, oldest first.
    async fn find_runs(&self, filter: &RunFilter) -> AppResult<Vec<TestRun>>;

    /// Most recent FAIL `executed_at` per test case, restricted to `filter`
    /// and `test_case_ids`. Cases without a matching failure are absent.
    async fn latest_failures(
        &self,
        filter: &RunFilter,
        test_case_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, DateTime<Utc>>>;
}

/// Batch lookup of test-case metadata.
#[async_trait]
pub trait TestCaseStore: Send + Sync {
    /// Summaries for the given ids; unknown ids are silently skipped.
    async fn find_summaries(&self, ids: &[Uuid]) -> AppResult<Vec<TestCaseSummary>>;
}

/// Project-level authorization gate.
#[async_trait]
pub trait ProjectAccess: Send + Sync {
    /// Whether a non-admin caller may read reports of `project_id`.
    async fn can_view_project(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
    ) -> AppResult<bool>;
}
