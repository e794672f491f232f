//! SeaORM entity definitions for PostgreSQL database.

pub mod api_key;
pub mod project_member;
pub mod test_case;
pub mod test_plan_case;
pub mod test_run;
pub mod test_suite_case;
