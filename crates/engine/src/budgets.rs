//! Per-user monthly spending limits, one per category name.
//!
//! The (user, category) pair is unique; setting a budget for an existing pair
//! overwrites the limit in place. No history is retained.

use sea_orm::entity::prelude::*;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// NULL only on rows that predate multi-tenancy.
    pub user_id: Option<i32>,
    pub category: String,
    pub limit_minor: i64,
    pub updated_at: DateTimeUtc,
}

impl Model {
    pub fn limit(&self) -> MoneyCents {
        MoneyCents::new(self.limit_minor)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
