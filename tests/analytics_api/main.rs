//! Report API test suite.
//!
//! Boots the actix app against an in-memory store with a fixed clock, so no
//! database is needed.
//!
//! Run with: cargo test --test analytics_api

mod test_helpers;

mod test_auth;
mod test_environment_comparison;
mod test_execution_trend;
mod test_overview;
mod test_status_breakdown;
mod test_test_analysis;
