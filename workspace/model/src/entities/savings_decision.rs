use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Persisted allocation recommendation for a salary cycle (one per cycle).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings_decisions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub salary_cycle_id: i32,
    pub saved_amount: Decimal,
    /// Serialized allocation engine output.
    pub ai_suggestions: Json,
    /// What the user finally chose to do, if recorded.
    pub user_choice: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
