//! Migration: Create test_runs table.
//!
//! Execution history the reports aggregate over.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE test_runs (
                    id UUID PRIMARY KEY,
                    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                    test_case_id UUID NOT NULL REFERENCES test_cases(id) ON DELETE CASCADE,
                    environment VARCHAR(100) NOT NULL,
                    status VARCHAR(20) NOT NULL
                        CHECK (status IN ('NOT_RUN', 'IN_PROGRESS', 'PASS', 'FAIL', 'BLOCKED', 'SKIPPED')),
                    executed_at TIMESTAMPTZ NOT NULL,
                    duration INTEGER CHECK (duration IS NULL OR duration >= 0),
                    notes TEXT,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Report working set: project + time window
                CREATE INDEX idx_test_runs_project_executed_at
                    ON test_runs(project_id, executed_at);

                -- Rankings and last-failure lookups
                CREATE INDEX idx_test_runs_test_case_status
                    ON test_runs(test_case_id, status, executed_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS test_runs CASCADE;")
            .await?;

        Ok(())
    }
}
