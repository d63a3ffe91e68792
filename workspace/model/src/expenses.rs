//! Expense bookkeeping for the active salary cycle.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info, instrument};

use crate::entities::{expense, salary_cycle};
use crate::error::{ModelError, Result};

/// Data for logging a new expense.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: String,
    pub note: Option<String>,
    pub is_default: bool,
}

/// Partial update of an expense; `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseChanges {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub note: Option<String>,
}

async fn find_expense<C>(db: &C, id: i32) -> Result<expense::Model>
where
    C: ConnectionTrait,
{
    expense::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ModelError::NotFound {
            entity: "Expense",
            id,
        })
}

/// Logs an expense against the active cycle.
#[instrument(skip(db))]
pub async fn add_expense<C>(db: &C, new_expense: NewExpense) -> Result<expense::Model>
where
    C: ConnectionTrait,
{
    let active = salary_cycle::Entity::find_active()
        .one(db)
        .await?
        .ok_or(ModelError::NoActiveCycle)?;

    let created = expense::ActiveModel {
        salary_cycle_id: Set(active.id),
        amount: Set(new_expense.amount),
        category: Set(new_expense.category),
        note: Set(new_expense.note.filter(|note| !note.is_empty())),
        is_default: Set(new_expense.is_default),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Expense {} added to cycle {}", created.id, active.id);
    Ok(created)
}

/// Expenses of the active cycle, newest first. Empty when no cycle is active.
#[instrument(skip(db))]
pub async fn expenses_for_active_cycle<C>(db: &C) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    let Some(active) = salary_cycle::Entity::find_active().one(db).await? else {
        debug!("No active cycle, returning no expenses");
        return Ok(Vec::new());
    };

    Ok(expense::Entity::find()
        .filter(expense::Column::SalaryCycleId.eq(active.id))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await?)
}

#[instrument(skip(db))]
pub async fn update_expense<C>(db: &C, id: i32, changes: ExpenseChanges) -> Result<expense::Model>
where
    C: ConnectionTrait,
{
    let existing = find_expense(db, id).await?;
    let mut expense: expense::ActiveModel = existing.into();

    if let Some(amount) = changes.amount {
        expense.amount = Set(amount);
    }
    if let Some(category) = changes.category {
        expense.category = Set(category);
    }
    if let Some(note) = changes.note {
        expense.note = Set(Some(note));
    }

    let updated = expense.update(db).await?;
    info!("Expense {} updated", id);
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_expense<C>(db: &C, id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    find_expense(db, id).await?.delete(db).await?;
    info!("Expense {} deleted", id);
    Ok(())
}
