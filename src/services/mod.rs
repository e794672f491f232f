//! Business logic services.

pub mod api_key;
