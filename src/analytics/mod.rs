//! Reporting engine over a project's test-run history.
//!
//! Every report is computed fresh: the filter predicate is built once per
//! request, the matching runs are fetched through the [`store`] traits and
//! then folded in memory by one of the aggregators.

pub mod clock;
pub mod environment;
pub mod filter;
pub mod memory;
pub mod service;
pub mod status_breakdown;
pub mod store;
pub mod test_analysis;
pub mod trend;

pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{ReportFilters, ReportScope, RunFilter, ScopeFilter, TimeRange, build_filter};
pub use memory::InMemoryStore;
pub use service::ReportService;
pub use store::{ProjectAccess, RunStore, TestCaseStore};
pub use test_analysis::AnalysisType;

use crate::models::TestRunStatus;

/// `round(part / whole * 100)`, half up, `0` when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u128;
    let whole = whole as u128;
    ((part * 200 + whole) / (whole * 2)) as u32
}

/// Pass/fail counters shared by the aggregators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub total: u64,
    pub pass: u64,
    pub fail: u64,
}

impl Tally {
    /// BLOCKED and SKIPPED only count toward the total.
    pub fn record(&mut self, status: TestRunStatus) {
        self.total += 1;
        match status {
            TestRunStatus::Pass => self.pass += 1,
            TestRunStatus::Fail => self.fail += 1,
            _ => {}
        }
    }

    pub fn pass_rate(&self) -> u32 {
        percentage(self.pass, self.total)
    }

    pub fn fail_rate(&self) -> u32 {
        percentage(self.fail, self.total)
    }
}
