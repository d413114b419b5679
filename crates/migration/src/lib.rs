pub use sea_orm_migration::prelude::*;

mod m20250110_000000_init;
mod m20250302_100000_entry_kind;
mod m20250415_090000_multi_tenant;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000000_init::Migration),
            Box::new(m20250302_100000_entry_kind::Migration),
            Box::new(m20250415_090000_multi_tenant::Migration),
        ]
    }
}
