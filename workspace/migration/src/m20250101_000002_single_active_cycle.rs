use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Partial indexes are not expressible through the index builder.
const CREATE_SINGLE_ACTIVE_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_salary_cycles_single_active \
     ON salary_cycles (status) WHERE status = 'ACTIVE'";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(CREATE_SINGLE_ACTIVE_INDEX)
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_salary_cycles_single_active")
            .await?;
        Ok(())
    }
}
