//! API key model for authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API key roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyRole {
    Admin,
    #[default]
    Viewer,
}

impl ApiKeyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Viewer => "viewer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiKeyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// API key stored in database.
#[derive(Debug, Clone)]
pub struct ApiKey {
    pub id: Uuid,
    /// Owner of the key; project membership is checked against this user.
    pub user_id: Uuid,
    /// SHA-256 hash of the full key
    pub key_hash: String,
    /// First 8 characters of the key for identification
    pub key_prefix: String,
    pub name: String,
    pub role: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Soft delete timestamp (revoked)
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// Check if the key is revoked.
    pub fn is_revoked(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the key is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// Get the role as enum.
    pub fn role_enum(&self) -> ApiKeyRole {
        ApiKeyRole::parse(&self.role).unwrap_or_default()
    }
}

/// Authenticated caller information extracted from request headers.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    pub key_id: String,
    /// `None` for the bootstrap admin key.
    pub user_id: Option<Uuid>,
    pub name: String,
    pub key_prefix: String,
    pub role: ApiKeyRole,
}

impl AuthenticatedCaller {
    /// Caller authenticated with the bootstrap admin key.
    pub fn bootstrap_admin() -> Self {
        AuthenticatedCaller {
            key_id: "admin".to_string(),
            user_id: None,
            name: "Admin (Bootstrap)".to_string(),
            key_prefix: "admin".to_string(),
            role: ApiKeyRole::Admin,
        }
    }

    /// Check if the caller has admin role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, ApiKeyRole::Admin)
    }
}
