//! Test insights server library.
//!
//! Read-only analytics over test-run history: status breakdown, execution
//! trend, environment comparison and flaky / top-failing rankings, served
//! over an actix-web API backed by PostgreSQL.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
