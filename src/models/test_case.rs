//! Test case projection used to label ranking results.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The slice of a test case the analytics engine reads.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseSummary {
    pub id: Uuid,
    pub name: String,
    pub debug_flag: bool,
    pub last_run_at: Option<DateTime<Utc>>,
}
