//! Link between a test plan and the test cases it covers.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "test_plan_cases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub test_plan_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub test_case_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
