//! Run counts per terminal status.

use std::collections::BTreeMap;

use super::percentage;
use crate::models::{StatusBreakdownResponse, StatusCount, TestRun, TestRunStatus};

/// Group runs by status.
///
/// Groups come out in canonical status order (PASS, FAIL, BLOCKED, SKIPPED);
/// statuses with no runs are omitted.
pub fn aggregate(runs: &[TestRun]) -> StatusBreakdownResponse {
    let mut counts: BTreeMap<TestRunStatus, u64> = BTreeMap::new();
    for run in runs {
        *counts.entry(run.status).or_default() += 1;
    }

    let total: u64 = counts.values().sum();

    let breakdown = counts
        .into_iter()
        .map(|(status, count)| StatusCount {
            status,
            count,
            percentage: percentage(count, total),
        })
        .collect();

    StatusBreakdownResponse { breakdown, total }
}
