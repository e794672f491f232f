//! Per-environment pass rates.

use std::collections::BTreeMap;

use super::Tally;
use crate::models::{EnvironmentComparisonResponse, EnvironmentStats, TestRun};

/// Collapse runs to one row per environment, sorted by name (byte order).
pub fn aggregate(runs: &[TestRun]) -> EnvironmentComparisonResponse {
    let mut by_environment: BTreeMap<&str, Tally> = BTreeMap::new();
    for run in runs {
        by_environment
            .entry(run.environment.as_str())
            .or_default()
            .record(run.status);
    }

    let environments = by_environment
        .into_iter()
        .map(|(environment, tally)| EnvironmentStats {
            environment: environment.to_string(),
            total_runs: tally.total,
            pass_count: tally.pass,
            fail_count: tally.fail,
            pass_rate: tally.pass_rate(),
        })
        .collect();

    EnvironmentComparisonResponse { environments }
}
