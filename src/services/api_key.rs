//! API key verification.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::db::{DbPool, api_keys as db};
use crate::error::{AppError, AppResult};
use crate::models::{ApiKey, AuthenticatedCaller};

/// Hash an API key using SHA-256.
pub fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Turn a stored key into a caller, rejecting revoked and expired keys.
pub fn caller_for_key(api_key: ApiKey, now: DateTime<Utc>) -> AppResult<AuthenticatedCaller> {
    if api_key.is_revoked() {
        return Err(AppError::Unauthorized(
            "API key has been revoked".to_string(),
        ));
    }

    if api_key.is_expired_at(now) {
        return Err(AppError::Unauthorized("API key has expired".to_string()));
    }

    let role = api_key.role_enum();

    Ok(AuthenticatedCaller {
        key_id: api_key.id.to_string(),
        user_id: Some(api_key.user_id),
        name: api_key.name,
        key_prefix: api_key.key_prefix,
        role,
    })
}

/// Verify an API key and return the authenticated caller.
pub async fn verify_key(pool: &DbPool, key: &str) -> AppResult<AuthenticatedCaller> {
    let key_hash = hash_key(key);
    let conn = pool.connection();

    let api_key = db::find_by_hash(conn, &key_hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid API key".to_string()))?;

    let now = Utc::now();
    let key_id = api_key.id;
    let caller = caller_for_key(api_key, now)?;

    // Best effort; a failed touch never rejects the request.
    if let Err(e) = db::update_last_used(conn, key_id, now).await {
        warn!(key_prefix = %caller.key_prefix, "Failed to update API key last_used_at: {}", e);
    }

    Ok(caller)
}
