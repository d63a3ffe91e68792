pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_salary_tables;
mod m20250101_000002_single_active_cycle;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_salary_tables::Migration),
            Box::new(m20250101_000002_single_active_cycle::Migration),
        ]
    }
}
