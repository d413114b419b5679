use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, DatabaseConnection, DbErr, PaginatorTrait, QueryFilter, QueryOrder,
    prelude::*, sea_query::OnConflict,
};

pub use error::EngineError;
pub use expenses::{EntryKind, ExpenseDraft};
pub use money::MoneyCents;
pub use stats::{BudgetStatus, CategoryTotal, Dashboard, MonthlySeries, SpendingTrend, dashboard};

pub mod budgets;
pub mod categories;
mod error;
pub mod expenses;
mod money;
mod stats;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;

/// Data-access handle over the relational store.
///
/// All record operations take the owning user id and enforce it as a row
/// filter or insert value; this is the multi-tenancy boundary. The handle is
/// constructed once by the process entry point and shared, and holds no state
/// beyond the connection pool.
#[derive(Debug)]
pub struct Store {
    database: DatabaseConnection,
}

impl Store {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    // ─── users ──────────────────────────────────────────────────────────

    /// Inserts a new user and returns its id.
    ///
    /// Fails with [`EngineError::Conflict`] when the email is already
    /// registered. A unique index on the email column backstops the
    /// pre-check under concurrent registration.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> ResultEngine<i32> {
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::Conflict(email.to_string()));
        }

        let user = users::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        let result = users::Entity::insert(user).exec(&self.database).await?;
        Ok(result.last_insert_id)
    }

    /// Looks a user up by email for credential checks.
    ///
    /// Returns `Ok(None)` for unknown emails; the caller is responsible for
    /// collapsing that case with a failed hash comparison into one generic
    /// authentication error.
    pub async fn user_by_email(&self, email: &str) -> ResultEngine<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?;
        Ok(user)
    }

    pub async fn user_by_id(&self, id: i32) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("user".to_string()))
    }

    // ─── expenses ───────────────────────────────────────────────────────

    /// All records owned by `owner_id`, newest date first, id ascending on
    /// equal dates for a deterministic order.
    pub async fn list_expenses(&self, owner_id: i32) -> ResultEngine<Vec<expenses::Model>> {
        let records = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(owner_id))
            .order_by_desc(expenses::Column::Date)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(records)
    }

    pub async fn create_expense(&self, owner_id: i32, draft: ExpenseDraft) -> ResultEngine<i32> {
        let result = expenses::Entity::insert(draft.into_insert(owner_id))
            .exec(&self.database)
            .await?;
        Ok(result.last_insert_id)
    }

    /// Full-field replace of the record matching both `id` and `owner_id`.
    ///
    /// "No such id" and "owned by someone else" collapse into the same
    /// [`EngineError::NotFound`]; a single filtered UPDATE keeps the call one
    /// round-trip and leaks nothing about foreign rows.
    pub async fn update_expense(
        &self,
        owner_id: i32,
        id: i32,
        draft: ExpenseDraft,
    ) -> ResultEngine<()> {
        let result = expenses::Entity::update_many()
            .set(draft.into_replace())
            .filter(expenses::Column::Id.eq(id))
            .filter(expenses::Column::UserId.eq(owner_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("expense".to_string()));
        }
        Ok(())
    }

    /// Hard delete, same collapsed not-found condition as update.
    pub async fn delete_expense(&self, owner_id: i32, id: i32) -> ResultEngine<()> {
        let result = expenses::Entity::delete_many()
            .filter(expenses::Column::Id.eq(id))
            .filter(expenses::Column::UserId.eq(owner_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("expense".to_string()));
        }
        Ok(())
    }

    // ─── categories ─────────────────────────────────────────────────────

    /// Union of global categories and the ones private to `owner_id`.
    pub async fn list_categories(&self, owner_id: i32) -> ResultEngine<Vec<categories::Model>> {
        let rows = categories::Entity::find()
            .filter(
                Condition::any()
                    .add(categories::Column::UserId.is_null())
                    .add(categories::Column::UserId.eq(owner_id)),
            )
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        Ok(rows)
    }

    /// Idempotent "ensure exists": inserting a (owner, name) pair that is
    /// already present is a silent no-op, resolved by the store's native
    /// conflict handling rather than read-then-write.
    pub async fn ensure_category(
        &self,
        owner_id: i32,
        name: &str,
        icon: &str,
        color: &str,
        kind: EntryKind,
    ) -> ResultEngine<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::Validation("name is required".to_string()));
        }

        let row = categories::ActiveModel {
            user_id: ActiveValue::Set(Some(owner_id)),
            name: ActiveValue::Set(name.to_string()),
            icon: ActiveValue::Set(icon.to_string()),
            color: ActiveValue::Set(color.to_string()),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            ..Default::default()
        };
        let result = categories::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([categories::Column::UserId, categories::Column::Name])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.database)
            .await;
        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Seeds the default global categories iff none currently exist.
    ///
    /// The gate is a live count, not a version flag: deleting every global
    /// category and restarting re-seeds them. Returns `true` when seeding
    /// ran.
    pub async fn seed_default_categories(&self) -> ResultEngine<bool> {
        let globals = categories::Entity::find()
            .filter(categories::Column::UserId.is_null())
            .count(&self.database)
            .await?;
        if globals > 0 {
            return Ok(false);
        }

        let rows = categories::DEFAULT_CATEGORIES
            .iter()
            .map(|(name, icon, color, kind)| categories::ActiveModel {
                user_id: ActiveValue::Set(None),
                name: ActiveValue::Set((*name).to_string()),
                icon: ActiveValue::Set((*icon).to_string()),
                color: ActiveValue::Set((*color).to_string()),
                kind: ActiveValue::Set(kind.as_str().to_string()),
                ..Default::default()
            });
        categories::Entity::insert_many(rows)
            .exec(&self.database)
            .await?;
        Ok(true)
    }

    // ─── budgets ────────────────────────────────────────────────────────

    pub async fn list_budgets(&self, owner_id: i32) -> ResultEngine<Vec<budgets::Model>> {
        let rows = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(owner_id))
            .order_by_asc(budgets::Column::Category)
            .all(&self.database)
            .await?;
        Ok(rows)
    }

    /// Insert-or-overwrite keyed on (owner, category), resolved by the
    /// store's conflict handling so concurrent identical requests cannot
    /// race into duplicate rows.
    pub async fn upsert_budget(
        &self,
        owner_id: i32,
        category: &str,
        limit: MoneyCents,
    ) -> ResultEngine<()> {
        let category = category.trim();
        if category.is_empty() {
            return Err(EngineError::Validation("category is required".to_string()));
        }
        if !limit.is_positive() {
            return Err(EngineError::Validation(
                "limit must be positive".to_string(),
            ));
        }

        let row = budgets::ActiveModel {
            user_id: ActiveValue::Set(Some(owner_id)),
            category: ActiveValue::Set(category.to_string()),
            limit_minor: ActiveValue::Set(limit.cents()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        budgets::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([budgets::Column::UserId, budgets::Column::Category])
                    .update_columns([budgets::Column::LimitMinor, budgets::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.database)
            .await?;
        Ok(())
    }
}
