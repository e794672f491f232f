//! Flaky and top-failing test case rankings.

use std::collections::HashMap;
use std::num::IntErrorKind;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{RunFilter, RunStore, Tally, TestCaseStore};
use crate::error::{AppError, AppResult};
use crate::models::{FlakyTest, TestAnalysisResponse, TestCaseSummary, TestRun, TopFailingTest};

/// Rows returned when no usable limit is requested.
pub const DEFAULT_LIMIT: usize = 10;
/// Hard ceiling on returned rows.
pub const MAX_LIMIT: usize = 50;

/// Name reported for test cases that no longer exist.
const UNKNOWN_TEST_CASE: &str = "Unknown";

/// Ranking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Flaky,
    TopFailing,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flaky => "flaky",
            Self::TopFailing => "top-failing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "flaky" => Some(Self::Flaky),
            "top-failing" => Some(Self::TopFailing),
            _ => None,
        }
    }

    /// Parse the required `type` parameter.
    pub fn from_param(value: Option<&str>) -> AppResult<Self> {
        value.and_then(Self::parse).ok_or_else(|| {
            AppError::InvalidInput("type must be 'flaky' or 'top-failing'".to_string())
        })
    }
}

/// Resolve the `limit` parameter.
///
/// Absent, zero or negative values use [`DEFAULT_LIMIT`]; values above
/// [`MAX_LIMIT`] are clamped, including integers beyond `i64`.
/// Non-integers are rejected.
pub fn resolve_limit(value: Option<&str>) -> AppResult<usize> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_LIMIT);
    };

    let requested = match raw.parse::<i64>() {
        Ok(n) => n,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => return Ok(MAX_LIMIT),
            IntErrorKind::NegOverflow => return Ok(DEFAULT_LIMIT),
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "limit must be an integer, got '{}'",
                    raw
                )));
            }
        },
    };

    Ok(if requested <= 0 {
        DEFAULT_LIMIT
    } else {
        (requested as u64).min(MAX_LIMIT as u64) as usize
    })
}

/// Per-test-case counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseTally {
    pub test_case_id: Uuid,
    pub total_runs: u64,
    pub pass_count: u64,
    pub fail_count: u64,
}

/// Tally runs per test case, ordered by test case id.
pub fn tally_by_case(runs: &[TestRun]) -> Vec<CaseTally> {
    let mut by_case: HashMap<Uuid, Tally> = HashMap::new();
    for run in runs {
        by_case.entry(run.test_case_id).or_default().record(run.status);
    }

    let mut tallies: Vec<CaseTally> = by_case
        .into_iter()
        .map(|(test_case_id, tally)| CaseTally {
            test_case_id,
            total_runs: tally.total,
            pass_count: tally.pass,
            fail_count: tally.fail,
        })
        .collect();
    tallies.sort_by_key(|t| t.test_case_id);
    tallies
}

fn score(fail_count: u64, total_runs: u64) -> u32 {
    super::percentage(fail_count, total_runs)
}

/// Test cases with both passes and failures, highest flakiness first.
///
/// Equal scores are ordered by test case id ascending.
pub fn rank_flaky(runs: &[TestRun], limit: usize) -> Vec<CaseTally> {
    let mut candidates: Vec<CaseTally> = tally_by_case(runs)
        .into_iter()
        .filter(|t| t.pass_count > 0 && t.fail_count > 0)
        .collect();

    candidates.sort_by(|a, b| {
        score(b.fail_count, b.total_runs)
            .cmp(&score(a.fail_count, a.total_runs))
            .then(a.test_case_id.cmp(&b.test_case_id))
    });
    candidates.truncate(limit);
    candidates
}

/// Test cases with at least one failure, most failures first.
///
/// Ranks by absolute failure count, not rate; ties are ordered by test case
/// id ascending.
pub fn rank_top_failing(runs: &[TestRun], limit: usize) -> Vec<CaseTally> {
    let mut candidates: Vec<CaseTally> = tally_by_case(runs)
        .into_iter()
        .filter(|t| t.fail_count > 0)
        .collect();

    candidates.sort_by(|a, b| {
        b.fail_count
            .cmp(&a.fail_count)
            .then(a.test_case_id.cmp(&b.test_case_id))
    });
    candidates.truncate(limit);
    candidates
}

/// Label flaky candidates with test case metadata.
pub fn enrich_flaky(
    candidates: &[CaseTally],
    test_cases: &HashMap<Uuid, TestCaseSummary>,
) -> Vec<FlakyTest> {
    candidates
        .iter()
        .map(|c| {
            let meta = test_cases.get(&c.test_case_id);
            FlakyTest {
                test_case_id: c.test_case_id,
                test_case_name: meta
                    .map(|m| m.name.clone())
                    .unwrap_or_else(|| UNKNOWN_TEST_CASE.to_string()),
                total_runs: c.total_runs,
                pass_count: c.pass_count,
                fail_count: c.fail_count,
                flakiness_score: score(c.fail_count, c.total_runs),
                debug_flag: meta.is_some_and(|m| m.debug_flag),
                last_run_at: meta.and_then(|m| m.last_run_at),
            }
        })
        .collect()
}

/// Label top-failing candidates with metadata and last failure time.
pub fn enrich_top_failing(
    candidates: &[CaseTally],
    test_cases: &HashMap<Uuid, TestCaseSummary>,
    last_failures: &HashMap<Uuid, DateTime<Utc>>,
) -> Vec<TopFailingTest> {
    candidates
        .iter()
        .map(|c| {
            let meta = test_cases.get(&c.test_case_id);
            TopFailingTest {
                test_case_id: c.test_case_id,
                test_case_name: meta
                    .map(|m| m.name.clone())
                    .unwrap_or_else(|| UNKNOWN_TEST_CASE.to_string()),
                fail_count: c.fail_count,
                total_runs: c.total_runs,
                fail_rate: score(c.fail_count, c.total_runs),
                debug_flag: meta.is_some_and(|m| m.debug_flag),
                last_failed_at: last_failures.get(&c.test_case_id).copied(),
            }
        })
        .collect()
}

/// Rank `runs` and enrich the surviving rows.
///
/// Metadata (and, for top-failing, last failure times) is fetched only for
/// the truncated candidate set.
pub async fn analyze(
    kind: AnalysisType,
    runs: &[TestRun],
    filter: &RunFilter,
    limit: usize,
    run_store: &dyn RunStore,
    test_case_store: &dyn TestCaseStore,
) -> AppResult<TestAnalysisResponse> {
    let candidates = match kind {
        AnalysisType::Flaky => rank_flaky(runs, limit),
        AnalysisType::TopFailing => rank_top_failing(runs, limit),
    };

    if candidates.is_empty() {
        return Ok(match kind {
            AnalysisType::Flaky => TestAnalysisResponse::Flaky { tests: Vec::new() },
            AnalysisType::TopFailing => TestAnalysisResponse::TopFailing { tests: Vec::new() },
        });
    }

    let ids: Vec<Uuid> = candidates.iter().map(|c| c.test_case_id).collect();
    let test_cases: HashMap<Uuid, TestCaseSummary> = test_case_store
        .find_summaries(&ids)
        .await?
        .into_iter()
        .map(|tc| (tc.id, tc))
        .collect();

    if test_cases.len() < ids.len() {
        tracing::debug!(
            requested = ids.len(),
            found = test_cases.len(),
            "Some ranked test cases no longer exist"
        );
    }

    Ok(match kind {
        AnalysisType::Flaky => TestAnalysisResponse::Flaky {
            tests: enrich_flaky(&candidates, &test_cases),
        },
        AnalysisType::TopFailing => {
            let last_failures = run_store.latest_failures(filter, &ids).await?;
            TestAnalysisResponse::TopFailing {
                tests: enrich_top_failing(&candidates, &test_cases, &last_failures),
            }
        }
    })
}
