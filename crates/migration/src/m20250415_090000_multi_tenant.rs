//! Introduces per-user ownership.
//!
//! Records and categories gain a nullable `user_id`; NULL marks rows that
//! predate this migration (for categories, NULL doubles as "global
//! default"). Budgets move from one-row-per-category to one row per
//! (user, category) pair, which needs a table rebuild since the old primary
//! key was the category name itself. Existing budget rows are carried over
//! with a NULL owner.

use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    UserId,
    Date,
}

#[derive(Iden)]
enum Categories {
    Table,
    UserId,
    Name,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    UserId,
    Category,
    LimitMinor,
    UpdatedAt,
}

#[derive(Iden)]
struct BudgetsLegacy;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();

        manager
            .alter_table(
                Table::alter()
                    .table(Expenses::Table)
                    .add_column(ColumnDef::new(Expenses::UserId).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-user_id-date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Categories::Table)
                    .add_column(ColumnDef::new(Categories::UserId).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-user_id-name-unique")
                    .table(Categories::Table)
                    .col(Categories::UserId)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        db.execute(Statement::from_string(
            backend,
            "ALTER TABLE budgets RENAME TO budgets_legacy;".to_string(),
        ))
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budgets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budgets::UserId).integer())
                    .col(ColumnDef::new(Budgets::Category).string().not_null())
                    .col(ColumnDef::new(Budgets::LimitMinor).big_integer().not_null())
                    .col(
                        ColumnDef::new(Budgets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-user_id-category-unique")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .col(Budgets::Category)
                    .unique()
                    .to_owned(),
            )
            .await?;

        db.execute(Statement::from_string(
            backend,
            "INSERT INTO budgets (user_id, category, limit_minor, updated_at) \
             SELECT NULL, category, limit_minor, updated_at FROM budgets_legacy;"
                .to_string(),
        ))
        .await?;

        manager
            .drop_table(Table::drop().table(BudgetsLegacy).to_owned())
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();

        db.execute(Statement::from_string(
            backend,
            "ALTER TABLE budgets RENAME TO budgets_tenant;".to_string(),
        ))
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budgets::Category)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budgets::LimitMinor).big_integer().not_null())
                    .col(
                        ColumnDef::new(Budgets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Only ownerless rows fit the old single-tenant key.
        db.execute(Statement::from_string(
            backend,
            "INSERT INTO budgets (category, limit_minor, updated_at) \
             SELECT category, limit_minor, updated_at FROM budgets_tenant \
             WHERE user_id IS NULL;"
                .to_string(),
        ))
        .await?;

        db.execute(Statement::from_string(
            backend,
            "DROP TABLE budgets_tenant;".to_string(),
        ))
        .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx-categories-user_id-name-unique")
                    .table(Categories::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Categories::Table)
                    .drop_column(Categories::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx-expenses-user_id-date")
                    .table(Expenses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Expenses::Table)
                    .drop_column(Expenses::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
