//! Project membership checks.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::analytics::ProjectAccess;
use crate::entity::project_member;
use crate::error::{AppError, AppResult};
use crate::models::AuthenticatedCaller;

use super::DbPool;

#[async_trait]
impl ProjectAccess for DbPool {
    async fn can_view_project(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
    ) -> AppResult<bool> {
        let Some(user_id) = caller.user_id else {
            return Ok(false);
        };

        let memberships = project_member::Entity::find()
            .filter(project_member::Column::ProjectId.eq(project_id))
            .filter(project_member::Column::UserId.eq(user_id))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to check project membership: {}", e)))?;

        Ok(memberships > 0)
    }
}
