use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SalaryCycles::Table)
                    .if_not_exists()
                    .col(pk_auto(SalaryCycles::Id))
                    .col(decimal(SalaryCycles::SalaryAmount).decimal_len(16, 4))
                    .col(date_time(SalaryCycles::CreditedAt))
                    .col(date_time_null(SalaryCycles::ClosedAt))
                    .col(string(SalaryCycles::Status).string_len(10))
                    .col(decimal_null(SalaryCycles::TotalExpenses).decimal_len(16, 4))
                    .col(decimal_null(SalaryCycles::TotalSaved).decimal_len(16, 4))
                    .col(date_time(SalaryCycles::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(integer(Expenses::SalaryCycleId))
                    .col(decimal(Expenses::Amount).decimal_len(16, 4))
                    .col(string(Expenses::Category))
                    .col(string_null(Expenses::Note))
                    .col(boolean(Expenses::IsDefault).default(false))
                    .col(date_time(Expenses::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_salary_cycle")
                            .from(Expenses::Table, Expenses::SalaryCycleId)
                            .to(SalaryCycles::Table, SalaryCycles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_salary_cycle_id")
                    .table(Expenses::Table)
                    .col(Expenses::SalaryCycleId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DefaultExpenses::Table)
                    .if_not_exists()
                    .col(pk_auto(DefaultExpenses::Id))
                    .col(string(DefaultExpenses::Name))
                    .col(decimal(DefaultExpenses::Amount).decimal_len(16, 4))
                    .col(boolean(DefaultExpenses::IsActive).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SavingsDecisions::Table)
                    .if_not_exists()
                    .col(pk_auto(SavingsDecisions::Id))
                    .col(integer(SavingsDecisions::SalaryCycleId).unique_key())
                    .col(decimal(SavingsDecisions::SavedAmount).decimal_len(16, 4))
                    .col(json(SavingsDecisions::AiSuggestions))
                    .col(string_null(SavingsDecisions::UserChoice))
                    .col(date_time(SavingsDecisions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_savings_decisions_salary_cycle")
                            .from(SavingsDecisions::Table, SavingsDecisions::SalaryCycleId)
                            .to(SalaryCycles::Table, SalaryCycles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavingsDecisions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DefaultExpenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalaryCycles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SalaryCycles {
    Table,
    Id,
    SalaryAmount,
    CreditedAt,
    ClosedAt,
    Status,
    TotalExpenses,
    TotalSaved,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    SalaryCycleId,
    Amount,
    Category,
    Note,
    IsDefault,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DefaultExpenses {
    Table,
    Id,
    Name,
    Amount,
    IsActive,
}

#[derive(DeriveIden)]
enum SavingsDecisions {
    Table,
    Id,
    SalaryCycleId,
    SavedAmount,
    AiSuggestions,
    UserChoice,
    CreatedAt,
}
