//! Request logging middleware.
//!
//! Every request gets a UUIDv7 request id, echoed in `X-Request-Id`, and a
//! tracing span carrying it so handler logs correlate with the access line.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::config::API_KEY_HEADER;

/// Response header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Characters of the API key that may appear in logs.
const KEY_PREFIX_CHARS: usize = 8;

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

/// Request logger middleware service.
pub struct RequestLoggerMiddleware<S> {
    service: S,
}

fn key_hint(req: &ServiceRequest) -> String {
    match req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(key) if key.chars().count() >= KEY_PREFIX_CHARS => {
            let prefix: String = key.chars().take(KEY_PREFIX_CHARS).collect();
            format!("{}...", prefix)
        }
        Some(_) => "invalid".to_string(),
        None => "none".to_string(),
    }
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let request_id = Uuid::now_v7().to_string();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let query = req.query_string().to_string();
        let remote_addr = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        let api_key = key_hint(&req);

        let span = info_span!(
            target: "api",
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        span.in_scope(|| {
            info!(
                target: "api",
                query = %query,
                remote_addr = %remote_addr,
                api_key = %api_key,
                "Request started"
            );
        });

        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut res = fut.await?;
                let elapsed_ms = start.elapsed().as_millis();
                let status = res.status();

                if status.is_success() {
                    info!(target: "api", status = status.as_u16(), duration_ms = %elapsed_ms, "Request completed");
                } else if status.is_client_error() {
                    warn!(target: "api", status = status.as_u16(), duration_ms = %elapsed_ms, "Client error");
                } else {
                    warn!(target: "api", status = status.as_u16(), duration_ms = %elapsed_ms, "Server error");
                }

                if let Ok(value) = HeaderValue::from_str(&request_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }

                Ok(res)
            }
            .instrument(span),
        )
    }
}
