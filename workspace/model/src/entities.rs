//! Root for all SeaORM entity modules of the salary tracker.
//!
//! A salary cycle owns its expenses and at most one savings decision.
//! Default expenses are standalone templates copied into new cycles.

pub mod default_expense;
pub mod expense;
pub mod salary_cycle;
pub mod savings_decision;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::default_expense::Entity as DefaultExpense;
    pub use super::expense::Entity as Expense;
    pub use super::salary_cycle::Entity as SalaryCycle;
    pub use super::savings_decision::Entity as SavingsDecision;
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, ModelTrait, Set};
    use serde_json::json;

    use super::salary_cycle::CycleStatus;
    use super::*;
    use crate::testing::setup_db;
    use prelude::*;

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now().naive_utc();

        let cycle = salary_cycle::ActiveModel {
            salary_amount: Set(Decimal::from(50000)),
            credited_at: Set(now),
            created_at: Set(now),
            status: Set(CycleStatus::Active),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        expense::ActiveModel {
            salary_cycle_id: Set(cycle.id),
            amount: Set(Decimal::from(1200)),
            category: Set("Food".to_string()),
            note: Set(Some("Groceries".to_string())),
            is_default: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        savings_decision::ActiveModel {
            salary_cycle_id: Set(cycle.id),
            saved_amount: Set(Decimal::from(48800)),
            ai_suggestions: Set(json!({ "reasoning": [] })),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let expenses = cycle.find_related(Expense).all(&db).await?;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[0].amount, Decimal::from(1200));

        let decision = cycle.find_related(SavingsDecision).one(&db).await?;
        assert!(decision.is_some());

        let active = SalaryCycle::find_active().one(&db).await?;
        assert_eq!(active.map(|c| c.id), Some(cycle.id));
        assert!(SalaryCycle::find_closed().one(&db).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_second_active_cycle_is_rejected() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now().naive_utc();

        let active = |amount: i64| salary_cycle::ActiveModel {
            salary_amount: Set(Decimal::from(amount)),
            credited_at: Set(now),
            created_at: Set(now),
            status: Set(CycleStatus::Active),
            ..Default::default()
        };

        active(40000).insert(&db).await?;
        let second = active(45000).insert(&db).await;
        assert!(second.is_err(), "the store must refuse a second ACTIVE cycle");

        Ok(())
    }
}
