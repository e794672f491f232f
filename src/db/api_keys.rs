//! Database operations for API keys using SeaORM.

use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::entity::api_key;
use crate::error::AppResult;
use crate::models::ApiKey;

/// Find an active (non-revoked) API key by its hash.
pub async fn find_by_hash(db: &DatabaseConnection, key_hash: &str) -> AppResult<Option<ApiKey>> {
    let result = api_key::Entity::find()
        .filter(api_key::Column::KeyHash.eq(key_hash))
        .filter(api_key::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    Ok(result.map(model_to_api_key))
}

/// Update last used timestamp.
pub async fn update_last_used(db: &DatabaseConnection, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
    let model = api_key::Entity::find_by_id(id).one(db).await?;

    if let Some(m) = model {
        let mut active: api_key::ActiveModel = m.into();
        active.last_used_at = Set(Some(at));
        active.update(db).await?;
    }

    Ok(())
}

fn model_to_api_key(m: api_key::Model) -> ApiKey {
    ApiKey {
        id: m.id,
        user_id: m.user_id,
        key_hash: m.key_hash,
        key_prefix: m.key_prefix,
        name: m.name,
        role: m.role,
        expires_at: m.expires_at,
        last_used_at: m.last_used_at,
        created_at: m.created_at,
        deleted_at: m.deleted_at,
    }
}
