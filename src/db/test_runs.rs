//! Test-run queries backing the report working set.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait};
use uuid::Uuid;

use crate::analytics::{RunFilter, RunStore, ScopeFilter};
use crate::entity::test_run::{self, Entity as TestRunEntity};
use crate::entity::{test_plan_case, test_suite_case};
use crate::error::{AppError, AppResult};
use crate::models::{TestRun, TestRunStatus};

use super::DbPool;

/// Translate a run predicate into a SQL condition.
pub(crate) fn run_condition(filter: &RunFilter) -> Condition {
    let excluded: Vec<&'static str> = filter
        .excluded_statuses()
        .iter()
        .map(TestRunStatus::as_str)
        .collect();

    let mut condition = Condition::all()
        .add(test_run::Column::ProjectId.eq(filter.project_id))
        .add(test_run::Column::Status.is_not_in(excluded));

    if let Some(from) = filter.executed_from {
        condition = condition.add(test_run::Column::ExecutedAt.gte(from));
    }
    if let Some(to) = filter.executed_to {
        condition = condition.add(test_run::Column::ExecutedAt.lte(to));
    }

    match filter.scope {
        Some(ScopeFilter::TestPlan(plan_id)) => {
            let linked = test_plan_case::Entity::find()
                .select_only()
                .column(test_plan_case::Column::TestCaseId)
                .filter(test_plan_case::Column::TestPlanId.eq(plan_id))
                .into_query();
            condition.add(test_run::Column::TestCaseId.in_subquery(linked))
        }
        Some(ScopeFilter::TestSuite(suite_id)) => {
            let linked = test_suite_case::Entity::find()
                .select_only()
                .column(test_suite_case::Column::TestCaseId)
                .filter(test_suite_case::Column::TestSuiteId.eq(suite_id))
                .into_query();
            condition.add(test_run::Column::TestCaseId.in_subquery(linked))
        }
        None => condition,
    }
}

fn model_to_test_run(model: test_run::Model) -> AppResult<TestRun> {
    let status = TestRunStatus::parse(&model.status).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown status '{}' on test run {}",
            model.status, model.id
        ))
    })?;

    Ok(TestRun {
        id: model.id,
        project_id: model.project_id,
        test_case_id: model.test_case_id,
        environment: model.environment,
        status,
        executed_at: model.executed_at,
        duration: model.duration,
        notes: model.notes,
    })
}

#[async_trait]
impl RunStore for DbPool {
    async fn find_runs(&self, filter: &RunFilter) -> AppResult<Vec<TestRun>> {
        let models = TestRunEntity::find()
            .filter(run_condition(filter))
            .order_by_asc(test_run::Column::ExecutedAt)
            .order_by_asc(test_run::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to query test runs: {}", e)))?;

        models.into_iter().map(model_to_test_run).collect()
    }

    async fn latest_failures(
        &self,
        filter: &RunFilter,
        test_case_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, DateTime<Utc>>> {
        if test_case_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let failures: Vec<(Uuid, DateTime<Utc>)> = TestRunEntity::find()
            .select_only()
            .column(test_run::Column::TestCaseId)
            .column(test_run::Column::ExecutedAt)
            .filter(run_condition(filter))
            .filter(test_run::Column::Status.eq(TestRunStatus::Fail.as_str()))
            .filter(test_run::Column::TestCaseId.is_in(test_case_ids.iter().copied()))
            .order_by_desc(test_run::Column::ExecutedAt)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to query latest failures: {}", e)))?;

        let mut latest = HashMap::with_capacity(test_case_ids.len());
        for (test_case_id, executed_at) in failures {
            latest.entry(test_case_id).or_insert(executed_at);
        }
        Ok(latest)
    }
}
