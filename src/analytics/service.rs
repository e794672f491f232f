//! Report facade: validation, authorization, filtering and dispatch.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::test_analysis::{self, AnalysisType};
use super::{
    Clock, ProjectAccess, ReportFilters, RunFilter, RunStore, TestCaseStore, build_filter,
    environment, status_breakdown, trend,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AuthenticatedCaller, EnvironmentComparisonResponse, ExecutionTrendResponse, OverviewResponse,
    ReportQuery, StatusBreakdownResponse, TestAnalysisQuery, TestAnalysisResponse, TestRun,
};

/// Entry point for every report.
///
/// Collaborators are injected; the service itself is stateless and cheap to
/// clone across workers.
#[derive(Clone)]
pub struct ReportService {
    runs: Arc<dyn RunStore>,
    test_cases: Arc<dyn TestCaseStore>,
    access: Arc<dyn ProjectAccess>,
    clock: Arc<dyn Clock>,
}

impl ReportService {
    pub fn new(
        runs: Arc<dyn RunStore>,
        test_cases: Arc<dyn TestCaseStore>,
        access: Arc<dyn ProjectAccess>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            runs,
            test_cases,
            access,
            clock,
        }
    }

    /// Run counts and shares per terminal status.
    pub async fn status_breakdown(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
        query: &ReportQuery,
    ) -> AppResult<StatusBreakdownResponse> {
        let (_, runs) = self.working_set(caller, project_id, query).await?;
        debug!(%project_id, runs = runs.len(), "Computing status breakdown");
        Ok(status_breakdown::aggregate(&runs))
    }

    /// Executions per day or week.
    pub async fn execution_trend(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
        query: &ReportQuery,
    ) -> AppResult<ExecutionTrendResponse> {
        let (_, runs) = self.working_set(caller, project_id, query).await?;
        debug!(%project_id, runs = runs.len(), "Computing execution trend");
        Ok(trend::aggregate(&runs))
    }

    /// Pass rates per environment.
    pub async fn environment_comparison(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
        query: &ReportQuery,
    ) -> AppResult<EnvironmentComparisonResponse> {
        let (_, runs) = self.working_set(caller, project_id, query).await?;
        debug!(%project_id, runs = runs.len(), "Computing environment comparison");
        Ok(environment::aggregate(&runs))
    }

    /// Status, trend and environment reports from a single fetch.
    pub async fn overview(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
        query: &ReportQuery,
    ) -> AppResult<OverviewResponse> {
        let (_, runs) = self.working_set(caller, project_id, query).await?;
        debug!(%project_id, runs = runs.len(), "Computing report overview");
        Ok(OverviewResponse {
            status_breakdown: status_breakdown::aggregate(&runs),
            execution_trend: trend::aggregate(&runs),
            environment_comparison: environment::aggregate(&runs),
        })
    }

    /// Flaky or top-failing test case ranking.
    pub async fn test_analysis(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
        query: &TestAnalysisQuery,
    ) -> AppResult<TestAnalysisResponse> {
        let kind = AnalysisType::from_param(query.analysis_type.as_deref())?;
        let limit = test_analysis::resolve_limit(query.limit.as_deref())?;

        let (filter, runs) = self.working_set(caller, project_id, &query.filters).await?;
        debug!(
            %project_id,
            kind = kind.as_str(),
            limit,
            runs = runs.len(),
            "Computing test analysis"
        );

        test_analysis::analyze(
            kind,
            &runs,
            &filter,
            limit,
            self.runs.as_ref(),
            self.test_cases.as_ref(),
        )
        .await
    }

    /// Validate the filters, authorize the caller and fetch matching runs.
    async fn working_set(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
        query: &ReportQuery,
    ) -> AppResult<(RunFilter, Vec<TestRun>)> {
        let filters = ReportFilters::from_query(query)?;
        self.authorize(caller, project_id).await?;

        debug!(
            %project_id,
            time_range = filters.time_range.map_or("all", |t| t.as_str()),
            scope = filters.scope.map_or("global", |s| s.as_str()),
            "Resolved report filters"
        );

        let filter = build_filter(project_id, &filters, self.clock.now());
        let runs = self.runs.find_runs(&filter).await?;
        Ok((filter, runs))
    }

    async fn authorize(&self, caller: &AuthenticatedCaller, project_id: Uuid) -> AppResult<()> {
        if caller.is_admin() || self.access.can_view_project(caller, project_id).await? {
            return Ok(());
        }

        tracing::warn!(
            %project_id,
            key_prefix = %caller.key_prefix,
            "Report access denied"
        );
        Err(AppError::Forbidden(format!(
            "No access to project {}",
            project_id
        )))
    }
}
