//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod reports;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use reports::configure_report_routes;

use actix_web::web;

/// Register every `/api/v1` route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_report_routes);
}
