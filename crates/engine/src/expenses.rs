//! Expense/income records.
//!
//! The amount is always stored positive in integer cents; the direction is
//! carried by `kind`. The category is a free-text name, not a foreign key;
//! an unknown name simply falls back to default presentation on the client.

use chrono::Utc;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine};

/// Whether a record moves money out (`expense`) or in (`income`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryKind {
    #[default]
    Expense,
    Income,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(EngineError::Validation(format!(
                "invalid entry kind: {other}"
            ))),
        }
    }
}

/// Validated input for creating or fully replacing an expense record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: MoneyCents,
    pub category: String,
    pub kind: EntryKind,
    pub date: Date,
    pub description: String,
}

impl ExpenseDraft {
    /// Builds a draft, rejecting blank title/category and non-positive
    /// amounts.
    pub fn new(
        title: &str,
        amount: MoneyCents,
        category: &str,
        kind: EntryKind,
        date: Date,
        description: Option<&str>,
    ) -> ResultEngine<Self> {
        let title = title.trim();
        let category = category.trim();
        if title.is_empty() {
            return Err(EngineError::Validation("title is required".to_string()));
        }
        if category.is_empty() {
            return Err(EngineError::Validation("category is required".to_string()));
        }
        if !amount.is_positive() {
            return Err(EngineError::Validation(
                "amount must be positive".to_string(),
            ));
        }

        Ok(Self {
            title: title.to_string(),
            amount,
            category: category.to_string(),
            kind,
            date,
            description: description.unwrap_or_default().to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// NULL only on rows that predate multi-tenancy; such rows are invisible
    /// to every owner-scoped query.
    pub user_id: Option<i32>,
    pub title: String,
    pub amount_minor: i64,
    pub category: String,
    pub kind: String,
    pub date: Date,
    pub description: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Parsed record kind; rows written through the API always hold a valid
    /// kind string, anything else is treated as an expense.
    pub fn entry_kind(&self) -> EntryKind {
        EntryKind::try_from(self.kind.as_str()).unwrap_or_default()
    }

    pub fn amount(&self) -> MoneyCents {
        MoneyCents::new(self.amount_minor)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ExpenseDraft {
    /// Active model for inserting a new record owned by `owner_id`.
    pub(crate) fn into_insert(self, owner_id: i32) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            user_id: ActiveValue::Set(Some(owner_id)),
            title: ActiveValue::Set(self.title),
            amount_minor: ActiveValue::Set(self.amount.cents()),
            category: ActiveValue::Set(self.category),
            kind: ActiveValue::Set(self.kind.as_str().to_string()),
            date: ActiveValue::Set(self.date),
            description: ActiveValue::Set(self.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
    }

    /// Active model replacing every mutable field of an existing record.
    pub(crate) fn into_replace(self) -> ActiveModel {
        ActiveModel {
            title: ActiveValue::Set(self.title),
            amount_minor: ActiveValue::Set(self.amount.cents()),
            category: ActiveValue::Set(self.category),
            kind: ActiveValue::Set(self.kind.as_str().to_string()),
            date: ActiveValue::Set(self.date),
            description: ActiveValue::Set(self.description),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
    }
}
