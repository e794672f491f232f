//! In-memory implementation of the store traits.
//!
//! Holds an immutable snapshot of runs, test cases, scope links and project
//! members. Used by tests and for serving fixture data without a database.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{ProjectAccess, RunFilter, RunStore, ScopeFilter, TestCaseStore};
use crate::error::AppResult;
use crate::models::{AuthenticatedCaller, TestCaseSummary, TestRun, TestRunStatus};

/// Snapshot-backed store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    runs: Vec<TestRun>,
    test_cases: HashMap<Uuid, TestCaseSummary>,
    plan_cases: HashMap<Uuid, HashSet<Uuid>>,
    suite_cases: HashMap<Uuid, HashSet<Uuid>>,
    members: HashSet<(Uuid, Uuid)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_run(mut self, run: TestRun) -> Self {
        self.runs.push(run);
        self
    }

    pub fn with_runs(mut self, runs: impl IntoIterator<Item = TestRun>) -> Self {
        self.runs.extend(runs);
        self
    }

    pub fn with_test_case(mut self, test_case: TestCaseSummary) -> Self {
        self.test_cases.insert(test_case.id, test_case);
        self
    }

    /// Link a test case to a test plan.
    pub fn link_plan(mut self, plan_id: Uuid, test_case_id: Uuid) -> Self {
        self.plan_cases.entry(plan_id).or_default().insert(test_case_id);
        self
    }

    /// Link a test case to a test suite.
    pub fn link_suite(mut self, suite_id: Uuid, test_case_id: Uuid) -> Self {
        self.suite_cases.entry(suite_id).or_default().insert(test_case_id);
        self
    }

    /// Make `user_id` a member of `project_id`.
    pub fn with_member(mut self, project_id: Uuid, user_id: Uuid) -> Self {
        self.members.insert((project_id, user_id));
        self
    }

    fn scoped_cases(&self, scope: Option<ScopeFilter>) -> Option<&HashSet<Uuid>> {
        match scope? {
            ScopeFilter::TestPlan(id) => self.plan_cases.get(&id),
            ScopeFilter::TestSuite(id) => self.suite_cases.get(&id),
        }
    }

    fn matching<'a>(&'a self, filter: &'a RunFilter) -> impl Iterator<Item = &'a TestRun> + 'a {
        let scoped = self.scoped_cases(filter.scope);
        self.runs.iter().filter(move |run| filter.matches(run, scoped))
    }
}

#[async_trait]
impl RunStore for InMemoryStore {
    async fn find_runs(&self, filter: &RunFilter) -> AppResult<Vec<TestRun>> {
        let mut runs: Vec<TestRun> = self.matching(filter).cloned().collect();
        runs.sort_by(|a, b| a.executed_at.cmp(&b.executed_at).then(a.id.cmp(&b.id)));
        Ok(runs)
    }

    async fn latest_failures(
        &self,
        filter: &RunFilter,
        test_case_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, DateTime<Utc>>> {
        let wanted: HashSet<&Uuid> = test_case_ids.iter().collect();
        let mut latest: HashMap<Uuid, DateTime<Utc>> = HashMap::new();

        for run in self
            .matching(filter)
            .filter(|run| run.status == TestRunStatus::Fail && wanted.contains(&run.test_case_id))
        {
            latest
                .entry(run.test_case_id)
                .and_modify(|at| *at = (*at).max(run.executed_at))
                .or_insert(run.executed_at);
        }

        Ok(latest)
    }
}

#[async_trait]
impl TestCaseStore for InMemoryStore {
    async fn find_summaries(&self, ids: &[Uuid]) -> AppResult<Vec<TestCaseSummary>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.test_cases.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl ProjectAccess for InMemoryStore {
    async fn can_view_project(
        &self,
        caller: &AuthenticatedCaller,
        project_id: Uuid,
    ) -> AppResult<bool> {
        Ok(caller
            .user_id
            .is_some_and(|user_id| self.members.contains(&(project_id, user_id))))
    }
}
