use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A single spending entry logged against a salary cycle.
/// Entries seeded from default expense templates have `is_default` set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub salary_cycle_id: i32,
    pub amount: Decimal,
    pub category: String,
    pub note: Option<String>,
    #[sea_orm(default_value = "false")]
    pub is_default: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An expense belongs to exactly one cycle and goes away with it.
    #[sea_orm(
        belongs_to = "super::salary_cycle::Entity",
        from = "Column::SalaryCycleId",
        to = "super::salary_cycle::Column::Id",
        on_delete = "Cascade"
    )]
    SalaryCycle,
}

impl Related<super::salary_cycle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalaryCycle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
