//! Execution trend over time.
//!
//! Runs are bucketed by UTC calendar day unless the observed history spans
//! more than [`DAILY_SPAN_LIMIT_DAYS`], in which case they are bucketed by
//! ISO week keyed on its Monday.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use super::Tally;
use crate::models::{ExecutionTrendResponse, TestRun, TrendGranularity, TrendPoint};

/// Longest span, in days, still reported with daily buckets.
pub const DAILY_SPAN_LIMIT_DAYS: i64 = 90;

/// Pick the bucket width for a set of runs.
pub fn choose_granularity(runs: &[TestRun]) -> TrendGranularity {
    if runs.len() < 2 {
        return TrendGranularity::Day;
    }

    let mut earliest = runs[0].executed_at;
    let mut latest = runs[0].executed_at;
    for run in &runs[1..] {
        earliest = earliest.min(run.executed_at);
        latest = latest.max(run.executed_at);
    }

    if latest - earliest <= Duration::days(DAILY_SPAN_LIMIT_DAYS) {
        TrendGranularity::Day
    } else {
        TrendGranularity::Week
    }
}

/// Bucket key for a timestamp.
pub fn bucket_start(executed_at: DateTime<Utc>, granularity: TrendGranularity) -> NaiveDate {
    let day = executed_at.date_naive();
    match granularity {
        TrendGranularity::Day => day,
        TrendGranularity::Week => {
            day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
        }
    }
}

/// Build the trend series, oldest bucket first.
pub fn aggregate(runs: &[TestRun]) -> ExecutionTrendResponse {
    let granularity = choose_granularity(runs);

    let mut buckets: BTreeMap<NaiveDate, Tally> = BTreeMap::new();
    for run in runs {
        buckets
            .entry(bucket_start(run.executed_at, granularity))
            .or_default()
            .record(run.status);
    }

    let trend = buckets
        .into_iter()
        .map(|(date, tally)| TrendPoint {
            date: date.format("%Y-%m-%d").to_string(),
            total_executed: tally.total,
            pass_count: tally.pass,
            fail_count: tally.fail,
            pass_rate: tally.pass_rate(),
        })
        .collect();

    ExecutionTrendResponse { trend, granularity }
}
