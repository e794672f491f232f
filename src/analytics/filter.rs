//! Report filter parsing and predicate construction.
//!
//! [`ReportFilters`] is the validated form of a [`ReportQuery`]; [`build_filter`]
//! turns it into the [`RunFilter`] every report runs against. Building never
//! fails: absent or half-specified filters fall back to the most permissive
//! interpretation.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ReportQuery, TestRun, TestRunStatus};

/// Requested time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Last24Hours,
    Last3Days,
    Last7Days,
    Custom,
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last24Hours => "24h",
            Self::Last3Days => "3d",
            Self::Last7Days => "7d",
            Self::Custom => "custom",
            Self::All => "all",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "24h" => Some(Self::Last24Hours),
            "3d" => Some(Self::Last3Days),
            "7d" => Some(Self::Last7Days),
            "custom" => Some(Self::Custom),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Look-back window for the relative ranges.
    pub fn lookback(&self) -> Option<Duration> {
        match self {
            Self::Last24Hours => Some(Duration::days(1)),
            Self::Last3Days => Some(Duration::days(3)),
            Self::Last7Days => Some(Duration::days(7)),
            Self::Custom | Self::All => None,
        }
    }
}

/// Requested report scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    Global,
    TestPlan,
    TestSuite,
}

impl ReportScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::TestPlan => "test-plan",
            Self::TestSuite => "test-suite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "global" => Some(Self::Global),
            "test-plan" => Some(Self::TestPlan),
            "test-suite" => Some(Self::TestSuite),
            _ => None,
        }
    }
}

/// Validated report filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub time_range: Option<TimeRange>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub scope: Option<ReportScope>,
    pub scope_id: Option<Uuid>,
}

impl ReportFilters {
    /// Validate raw query parameters.
    ///
    /// Dates are only read when `timeRange` is `custom`; malformed dates
    /// there and malformed scope ids are caller errors. Unknown `timeRange`
    /// and `scope` values are treated as absent.
    pub fn from_query(query: &ReportQuery) -> AppResult<Self> {
        let time_range = query.time_range.as_deref().and_then(|raw| {
            let parsed = TimeRange::parse(raw);
            if parsed.is_none() {
                tracing::debug!(time_range = %raw, "Unknown timeRange, ignoring");
            }
            parsed
        });

        let scope = query.scope.as_deref().and_then(|raw| {
            let parsed = ReportScope::parse(raw);
            if parsed.is_none() {
                tracing::debug!(scope = %raw, "Unknown scope, ignoring");
            }
            parsed
        });

        let (date_from, date_to) = if time_range == Some(TimeRange::Custom) {
            (
                non_empty(query.date_from.as_deref())
                    .map(|raw| parse_date_param("dateFrom", raw, DayEdge::Start))
                    .transpose()?,
                non_empty(query.date_to.as_deref())
                    .map(|raw| parse_date_param("dateTo", raw, DayEdge::End))
                    .transpose()?,
            )
        } else {
            (None, None)
        };

        let scope_id = non_empty(query.scope_id.as_deref())
            .map(|raw| {
                Uuid::parse_str(raw)
                    .map_err(|e| AppError::InvalidInput(format!("scopeId is not a UUID: {}", e)))
            })
            .transpose()?;

        Ok(ReportFilters {
            time_range,
            date_from,
            date_to,
            scope,
            scope_id,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Which end of the day a date-only value resolves to.
#[derive(Debug, Clone, Copy)]
enum DayEdge {
    Start,
    End,
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (read as UTC)
/// or a plain `YYYY-MM-DD` date.
fn parse_date_param(name: &str, raw: &str, edge: DayEdge) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::InvalidInput(format!(
            "{} must be an ISO date (YYYY-MM-DD) or RFC 3339 timestamp, got '{}'",
            name, raw
        ))
    })?;

    let naive = match edge {
        DayEdge::Start => date.and_hms_opt(0, 0, 0),
        DayEdge::End => date.and_hms_micro_opt(23, 59, 59, 999_999),
    };

    naive
        .map(|n| n.and_utc())
        .ok_or_else(|| AppError::InvalidInput(format!("{} is out of range", name)))
}

/// Restriction to test cases linked to a plan or suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    TestPlan(Uuid),
    TestSuite(Uuid),
}

/// Predicate selecting the runs a report works on.
///
/// NOT_RUN and IN_PROGRESS runs are always excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFilter {
    pub project_id: Uuid,
    /// Inclusive lower bound on `executed_at`.
    pub executed_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `executed_at`.
    pub executed_to: Option<DateTime<Utc>>,
    pub scope: Option<ScopeFilter>,
}

impl RunFilter {
    /// Filter matching every terminal run of a project.
    pub fn for_project(project_id: Uuid) -> Self {
        RunFilter {
            project_id,
            executed_from: None,
            executed_to: None,
            scope: None,
        }
    }

    /// Statuses excluded from every report.
    pub fn excluded_statuses(&self) -> &'static [TestRunStatus] {
        &TestRunStatus::NON_TERMINAL
    }

    /// Evaluate the predicate in memory.
    ///
    /// `scoped_cases` holds the test cases linked to `self.scope`; it is
    /// ignored when the filter has no scope and treated as empty when missing.
    pub fn matches(&self, run: &TestRun, scoped_cases: Option<&HashSet<Uuid>>) -> bool {
        if run.project_id != self.project_id || !run.status.is_terminal() {
            return false;
        }
        if self.executed_from.is_some_and(|from| run.executed_at < from) {
            return false;
        }
        if self.executed_to.is_some_and(|to| run.executed_at > to) {
            return false;
        }
        match self.scope {
            None => true,
            Some(_) => scoped_cases.is_some_and(|cases| cases.contains(&run.test_case_id)),
        }
    }
}

/// Build the run predicate for a project.
///
/// `now` anchors the relative ranges (`24h`, `3d`, `7d`). A `custom` range
/// without `date_from` adds no time bound at all, even when `date_to` is set.
pub fn build_filter(project_id: Uuid, filters: &ReportFilters, now: DateTime<Utc>) -> RunFilter {
    let mut filter = RunFilter::for_project(project_id);

    match filters.time_range {
        Some(TimeRange::Custom) => {
            if let Some(from) = filters.date_from {
                filter.executed_from = Some(from);
                filter.executed_to = filters.date_to;
            }
        }
        Some(range) => {
            filter.executed_from = range.lookback().map(|window| now - window);
        }
        None => {}
    }

    filter.scope = match (filters.scope, filters.scope_id) {
        (Some(ReportScope::TestPlan), Some(id)) => Some(ScopeFilter::TestPlan(id)),
        (Some(ReportScope::TestSuite), Some(id)) => Some(ScopeFilter::TestSuite(id)),
        _ => None,
    };

    filter
}
