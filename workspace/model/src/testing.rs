//! Helpers shared by the model crate's tests.

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

use crate::entities::{default_expense, expense};

/// In-memory SQLite database with all migrations applied.
pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn insert_default(
    db: &DatabaseConnection,
    name: &str,
    amount: i64,
    is_active: bool,
) -> Result<default_expense::Model, DbErr> {
    default_expense::ActiveModel {
        name: Set(name.to_string()),
        amount: Set(Decimal::from(amount)),
        is_active: Set(is_active),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_expense(
    db: &DatabaseConnection,
    cycle_id: i32,
    category: &str,
    amount: i64,
) -> Result<expense::Model, DbErr> {
    expense::ActiveModel {
        salary_cycle_id: Set(cycle_id),
        amount: Set(Decimal::from(amount)),
        category: Set(category.to_string()),
        note: Set(None),
        is_default: Set(false),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}
