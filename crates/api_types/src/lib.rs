use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by every endpoint.
///
/// `success` is `true` for 2xx responses; `data` carries the payload and is
/// `null` on errors; `errors` is reserved for structured validation detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: None,
        }
    }
}

/// Whether a record moves money out (`expense`) or in (`income`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Expense,
    Income,
}

impl EntryKind {
    /// Returns the canonical kind string used by the engine/database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Registered {
        pub user_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }

    /// Returned on successful login: the bearer token plus basic profile
    /// fields so the client can greet the user without a second request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginData {
        pub token: String,
        pub user_id: i32,
        pub name: String,
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Profile {
        pub id: i32,
        pub name: String,
        pub email: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        /// Decimal string with at most two fraction digits, e.g. `"42.50"`.
        pub amount: String,
        pub category: String,
        pub date: NaiveDate,
        pub description: Option<String>,
        pub kind: Option<EntryKind>,
    }

    /// Full-field replace; there is no partial patch.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub title: String,
        /// Decimal string with at most two fraction digits, e.g. `"42.50"`.
        pub amount: String,
        pub category: String,
        pub date: NaiveDate,
        pub description: Option<String>,
        pub kind: Option<EntryKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i32,
        pub title: String,
        /// Decimal string with exactly two fraction digits.
        pub amount: String,
        pub category: String,
        pub kind: EntryKind,
        pub date: NaiveDate,
        pub description: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        pub icon: Option<String>,
        pub color: Option<String>,
        pub kind: Option<EntryKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i32,
        pub name: String,
        pub icon: String,
        pub color: String,
        pub kind: EntryKind,
        /// `true` for seeded defaults shared across all users.
        pub global: bool,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUpsert {
        pub category: String,
        /// Decimal string with at most two fraction digits.
        pub limit_amount: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub category: String,
        /// Decimal string with exactly two fraction digits.
        pub limit_amount: String,
        pub updated_at: DateTime<Utc>,
    }
}
