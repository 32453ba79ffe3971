pub use sea_orm_migration::prelude::*;

mod columns;
mod m20260901_000000_users;
mod m20260901_000100_tax;
mod m20260901_000200_bills;
mod m20260901_000300_botw;
mod m20260901_000400_income_occurrences;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000000_users::Migration),
            Box::new(m20260901_000100_tax::Migration),
            Box::new(m20260901_000200_bills::Migration),
            Box::new(m20260901_000300_botw::Migration),
            Box::new(m20260901_000400_income_occurrences::Migration),
        ]
    }
}
