//! Persisted savings decisions (one per salary cycle).

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use sea_orm::prelude::Json;
use tracing::{debug, instrument};

use crate::entities::{salary_cycle, savings_decision};
use crate::error::{ModelError, Result};

/// Stores the latest recommendation for a cycle, replacing an earlier one.
///
/// The user's recorded choice, if any, is kept.
#[instrument(skip(db, suggestions))]
pub async fn upsert_decision<C>(
    db: &C,
    cycle_id: i32,
    saved_amount: Decimal,
    suggestions: Json,
) -> Result<savings_decision::Model>
where
    C: ConnectionTrait,
{
    if salary_cycle::Entity::find_by_id(cycle_id).one(db).await?.is_none() {
        return Err(ModelError::NotFound {
            entity: "Salary cycle",
            id: cycle_id,
        });
    }

    let decision = savings_decision::ActiveModel {
        salary_cycle_id: Set(cycle_id),
        saved_amount: Set(saved_amount),
        ai_suggestions: Set(suggestions),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    savings_decision::Entity::insert(decision)
        .on_conflict(
            OnConflict::column(savings_decision::Column::SalaryCycleId)
                .update_columns([
                    savings_decision::Column::SavedAmount,
                    savings_decision::Column::AiSuggestions,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;
    debug!("Savings decision stored for cycle {}", cycle_id);

    savings_decision::Entity::find()
        .filter(savings_decision::Column::SalaryCycleId.eq(cycle_id))
        .one(db)
        .await?
        .ok_or(ModelError::NotFound {
            entity: "Savings decision",
            id: cycle_id,
        })
}
