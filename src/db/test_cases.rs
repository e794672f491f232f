//! Test-case metadata lookups.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::analytics::TestCaseStore;
use crate::entity::test_case::{self, Entity as TestCaseEntity};
use crate::error::{AppError, AppResult};
use crate::models::TestCaseSummary;

use super::DbPool;

fn model_to_summary(model: test_case::Model) -> TestCaseSummary {
    TestCaseSummary {
        id: model.id,
        name: model.name,
        debug_flag: model.debug_flag,
        last_run_at: model.last_run_at,
    }
}

#[async_trait]
impl TestCaseStore for DbPool {
    async fn find_summaries(&self, ids: &[Uuid]) -> AppResult<Vec<TestCaseSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = TestCaseEntity::find()
            .filter(test_case::Column::Id.is_in(ids.iter().copied()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load test cases: {}", e)))?;

        Ok(models.into_iter().map(model_to_summary).collect())
    }
}
