//! Actix-web extractor for API key authentication.
//!
//! Header values are wrapped in `SecretString` as soon as they are read and
//! never logged.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use secrecy::{ExposeSecret, SecretString};

use super::AdminKey;
use crate::config::{ADMIN_KEY_HEADER, API_KEY_HEADER};
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::AuthenticatedCaller;
use crate::services::api_key;

/// Extract a secret header value, wrapping it in SecretString.
/// Returns None if the header is missing or invalid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

/// Extractor that requires a valid admin key or API key.
///
/// ```ignore
/// async fn protected_handler(auth: ApiKeyAuth) -> impl Responder {
///     // auth.caller contains the authenticated caller info
/// }
/// ```
pub struct ApiKeyAuth {
    pub caller: AuthenticatedCaller,
}

impl FromRequest for ApiKeyAuth {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let stored_admin_key = req.app_data::<web::Data<AdminKey>>().cloned();
        let pool = req.app_data::<web::Data<DbPool>>().cloned();

        let provided_api_key = extract_secret_header(req, API_KEY_HEADER);
        let provided_admin_key = extract_secret_header(req, ADMIN_KEY_HEADER);

        Box::pin(async move {
            // Admin key first; it needs no database round-trip.
            if let Some(provided) = &provided_admin_key
                && let Some(key) = &stored_admin_key
                && key.verify(provided.expose_secret())
            {
                return Ok(ApiKeyAuth {
                    caller: AuthenticatedCaller::bootstrap_admin(),
                });
            }

            let Some(key) = provided_api_key else {
                return Err(AppError::Unauthorized(
                    "Missing API key. Provide X-API-Key header.".to_string(),
                ));
            };

            let Some(pool) = pool else {
                tracing::error!("API key presented but no database pool is registered");
                return Err(AppError::Unauthorized("Invalid API key".to_string()));
            };

            let caller = api_key::verify_key(pool.get_ref(), key.expose_secret()).await?;
            Ok(ApiKeyAuth { caller })
        })
    }
}
