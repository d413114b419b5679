//! Category registry.
//!
//! A row with `user_id = NULL` is a *global* default, seeded once and shared
//! across all users; a row with an owner is private to that user.

use sea_orm::entity::prelude::*;

use crate::expenses::EntryKind;

pub const DEFAULT_ICON: &str = "tag";
pub const DEFAULT_COLOR: &str = "neutral-gray";

/// Global defaults seeded when no global category exists.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str, EntryKind); 9] = [
    ("Food", "utensils", "orange", EntryKind::Expense),
    ("Transport", "car", "blue", EntryKind::Expense),
    ("Shopping", "bag", "purple", EntryKind::Expense),
    ("Entertainment", "film", "pink", EntryKind::Expense),
    ("Health", "heart", "red", EntryKind::Expense),
    ("Utilities", "bolt", "yellow", EntryKind::Expense),
    ("Salary", "wallet", "green", EntryKind::Income),
    ("Freelance", "laptop", "teal", EntryKind::Income),
    ("Other", "layers", DEFAULT_COLOR, EntryKind::Expense),
];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// NULL marks a seeded global default.
    pub user_id: Option<i32>,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: String,
}

impl Model {
    pub fn entry_kind(&self) -> EntryKind {
        EntryKind::try_from(self.kind.as_str()).unwrap_or_default()
    }

    pub fn is_global(&self) -> bool {
        self.user_id.is_none()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
