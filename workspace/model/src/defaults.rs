//! Default expense templates.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use tracing::{info, instrument};

use crate::entities::default_expense;
use crate::error::{ModelError, Result};

/// Partial update of a template; `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DefaultChanges {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub is_active: Option<bool>,
}

async fn find_default<C>(db: &C, id: i32) -> Result<default_expense::Model>
where
    C: ConnectionTrait,
{
    default_expense::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ModelError::NotFound {
            entity: "Default expense",
            id,
        })
}

/// All templates ordered by name.
#[instrument(skip(db))]
pub async fn list_defaults<C>(db: &C) -> Result<Vec<default_expense::Model>>
where
    C: ConnectionTrait,
{
    Ok(default_expense::Entity::find()
        .order_by_asc(default_expense::Column::Name)
        .all(db)
        .await?)
}

/// Creates an active template.
#[instrument(skip(db))]
pub async fn add_default<C>(db: &C, name: String, amount: Decimal) -> Result<default_expense::Model>
where
    C: ConnectionTrait,
{
    let created = default_expense::ActiveModel {
        name: Set(name),
        amount: Set(amount),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Default expense {} '{}' created", created.id, created.name);
    Ok(created)
}

#[instrument(skip(db))]
pub async fn update_default<C>(
    db: &C,
    id: i32,
    changes: DefaultChanges,
) -> Result<default_expense::Model>
where
    C: ConnectionTrait,
{
    let mut template: default_expense::ActiveModel = find_default(db, id).await?.into();

    if let Some(name) = changes.name {
        template.name = Set(name);
    }
    if let Some(amount) = changes.amount {
        template.amount = Set(amount);
    }
    if let Some(is_active) = changes.is_active {
        template.is_active = Set(is_active);
    }

    let updated = template.update(db).await?;
    info!("Default expense {} updated", id);
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_default<C>(db: &C, id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    find_default(db, id).await?.delete(db).await?;
    info!("Default expense {} deleted", id);
    Ok(())
}
