//! Salary cycle lifecycle.
//!
//! A cycle is born `ACTIVE` when a salary is credited and becomes `CLOSED`
//! when the next salary arrives. Closing freezes the cycle's expense and
//! savings totals. Creating a cycle also seeds it with the active default
//! expense templates. All multi-step transitions run in one database
//! transaction: if anything fails the previous cycle stays active.

use chrono::Utc;
use common::DEFAULT_CATEGORY;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, trace};

use crate::entities::salary_cycle::{self, CycleStatus};
use crate::entities::{default_expense, expense, savings_decision};
use crate::error::{ModelError, Result};

/// A salary cycle together with the records it owns.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleWithDetails {
    pub cycle: salary_cycle::Model,
    /// Newest first.
    pub expenses: Vec<expense::Model>,
    pub savings: Option<savings_decision::Model>,
}

/// One page of closed cycles, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleHistoryPage {
    pub cycles: Vec<CycleWithDetails>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Totals frozen on a cycle when it is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClosingTotals {
    pub total_expenses: Decimal,
    /// Salary minus expenses, negative when the cycle was overspent.
    pub total_saved: Decimal,
}

impl ClosingTotals {
    pub fn compute(salary_amount: Decimal, expenses: &[expense::Model]) -> Self {
        let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
        Self {
            total_expenses,
            total_saved: salary_amount - total_expenses,
        }
    }
}

async fn load_details<C>(db: &C, cycle: salary_cycle::Model) -> Result<CycleWithDetails>
where
    C: ConnectionTrait,
{
    let expenses = expense::Entity::find()
        .filter(expense::Column::SalaryCycleId.eq(cycle.id))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await?;
    let savings = cycle.find_related(savings_decision::Entity).one(db).await?;

    Ok(CycleWithDetails {
        cycle,
        expenses,
        savings,
    })
}

/// Credits a new salary.
///
/// Closes the currently active cycle (if any), opens a new active cycle and
/// seeds it with one expense per active default expense template. Either all
/// of this happens or nothing does.
#[instrument(skip(db))]
pub async fn create_cycle<C>(db: &C, salary_amount: Decimal) -> Result<CycleWithDetails>
where
    C: ConnectionTrait + TransactionTrait,
{
    trace!("Entering create_cycle function");
    let txn = db.begin().await?;
    let now = Utc::now().naive_utc();

    if let Some(previous) = salary_cycle::Entity::find_active().one(&txn).await? {
        let expenses = previous.find_related(expense::Entity).all(&txn).await?;
        let totals = ClosingTotals::compute(previous.salary_amount, &expenses);
        let previous_id = previous.id;

        let mut closing: salary_cycle::ActiveModel = previous.into();
        closing.status = Set(CycleStatus::Closed);
        closing.closed_at = Set(Some(now));
        closing.total_expenses = Set(Some(totals.total_expenses));
        closing.total_saved = Set(Some(totals.total_saved));
        closing.update(&txn).await?;

        info!(
            "Closed salary cycle {} (expenses: {}, saved: {})",
            previous_id, totals.total_expenses, totals.total_saved
        );
    }

    let cycle = salary_cycle::ActiveModel {
        salary_amount: Set(salary_amount),
        credited_at: Set(now),
        closed_at: Set(None),
        status: Set(CycleStatus::Active),
        total_expenses: Set(None),
        total_saved: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    debug!("Opened salary cycle {}", cycle.id);

    let templates = default_expense::Entity::find()
        .filter(default_expense::Column::IsActive.eq(true))
        .all(&txn)
        .await?;

    if !templates.is_empty() {
        let seeded = templates.iter().map(|template| expense::ActiveModel {
            salary_cycle_id: Set(cycle.id),
            amount: Set(template.amount),
            category: Set(DEFAULT_CATEGORY.to_string()),
            note: Set(Some(template.name.clone())),
            is_default: Set(true),
            created_at: Set(now),
            ..Default::default()
        });
        expense::Entity::insert_many(seeded).exec(&txn).await?;
        debug!(
            "Seeded {} default expenses into cycle {}",
            templates.len(),
            cycle.id
        );
    }

    let details = load_details(&txn, cycle).await?;
    txn.commit().await?;

    info!("Salary cycle {} is now active", details.cycle.id);
    Ok(details)
}

/// Returns the active cycle with its expenses and savings decision, or `None`.
#[instrument(skip(db))]
pub async fn get_active_cycle<C>(db: &C) -> Result<Option<CycleWithDetails>>
where
    C: ConnectionTrait,
{
    match salary_cycle::Entity::find_active().one(db).await? {
        Some(cycle) => Ok(Some(load_details(db, cycle).await?)),
        None => Ok(None),
    }
}

/// Changes the salary of the active cycle in place.
#[instrument(skip(db))]
pub async fn update_active_cycle_salary<C>(db: &C, salary_amount: Decimal) -> Result<CycleWithDetails>
where
    C: ConnectionTrait,
{
    let active = salary_cycle::Entity::find_active()
        .one(db)
        .await?
        .ok_or(ModelError::NoActiveCycle)?;
    let cycle_id = active.id;

    let mut cycle: salary_cycle::ActiveModel = active.into();
    cycle.salary_amount = Set(salary_amount);
    let updated = cycle.update(db).await?;

    info!("Salary of cycle {} updated to {}", cycle_id, salary_amount);
    load_details(db, updated).await
}

/// Deletes the active cycle together with its expenses and savings decision.
#[instrument(skip(db))]
pub async fn delete_active_cycle<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let active = salary_cycle::Entity::find_active()
        .one(&txn)
        .await?
        .ok_or(ModelError::NoActiveCycle)?;
    let cycle_id = active.id;

    let removed_decisions = savings_decision::Entity::delete_many()
        .filter(savings_decision::Column::SalaryCycleId.eq(cycle_id))
        .exec(&txn)
        .await?;
    let removed_expenses = expense::Entity::delete_many()
        .filter(expense::Column::SalaryCycleId.eq(cycle_id))
        .exec(&txn)
        .await?;
    active.delete(&txn).await?;
    txn.commit().await?;

    info!(
        "Deleted salary cycle {} ({} expenses, {} savings decisions)",
        cycle_id, removed_expenses.rows_affected, removed_decisions.rows_affected
    );
    Ok(())
}

/// Pages through closed cycles, newest credited first. `page` is 1-based.
#[instrument(skip(db))]
pub async fn get_cycle_history<C>(db: &C, page: u64, limit: u64) -> Result<CycleHistoryPage>
where
    C: ConnectionTrait,
{
    let page = page.max(1);
    let limit = limit.max(1);

    let paginator = salary_cycle::Entity::find_closed()
        .order_by_desc(salary_cycle::Column::CreditedAt)
        .order_by_desc(salary_cycle::Column::Id)
        .paginate(db, limit);
    let total = paginator.num_items().await?;
    // Pages past the end are empty; skipping the query also keeps the
    // offset from overflowing for huge page numbers.
    let closed = match (page - 1).checked_mul(limit) {
        Some(offset) if offset < total => paginator.fetch_page(page - 1).await?,
        _ => Vec::new(),
    };

    let mut cycles = Vec::with_capacity(closed.len());
    for cycle in closed {
        cycles.push(load_details(db, cycle).await?);
    }

    debug!("History page {} holds {} of {} closed cycles", page, cycles.len(), total);
    Ok(CycleHistoryPage {
        cycles,
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
    })
}

/// All closed cycles with their expenses, oldest credited first.
#[instrument(skip(db))]
pub async fn closed_cycles_with_expenses<C>(
    db: &C,
) -> Result<Vec<(salary_cycle::Model, Vec<expense::Model>)>>
where
    C: ConnectionTrait,
{
    let closed = salary_cycle::Entity::find_closed()
        .order_by_asc(salary_cycle::Column::CreditedAt)
        .order_by_asc(salary_cycle::Column::Id)
        .all(db)
        .await?;

    let mut result = Vec::with_capacity(closed.len());
    for cycle in closed {
        let expenses = cycle.find_related(expense::Entity).all(db).await?;
        result.push((cycle, expenses));
    }
    Ok(result)
}
