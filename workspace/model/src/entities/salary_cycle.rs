use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Lifecycle state of a salary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum CycleStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

impl CycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Active => "ACTIVE",
            CycleStatus::Closed => "CLOSED",
        }
    }
}

/// The period between one salary credit and the next.
///
/// At most one cycle is `Active` at any time. `total_expenses` and
/// `total_saved` are only filled in when the cycle is closed and are never
/// recomputed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "salary_cycles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub salary_amount: Decimal,
    pub credited_at: NaiveDateTime,
    pub closed_at: Option<NaiveDateTime>,
    pub status: CycleStatus,
    pub total_expenses: Option<Decimal>,
    pub total_saved: Option<Decimal>,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expense::Entity")]
    Expense,
    #[sea_orm(has_one = "super::savings_decision::Entity")]
    SavingsDecision,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expense.def()
    }
}

impl Related<super::savings_decision::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavingsDecision.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Selects the currently active cycle (there is at most one).
    pub fn find_active() -> Select<Entity> {
        Self::find().filter(Column::Status.eq(CycleStatus::Active))
    }

    /// Selects all closed cycles.
    pub fn find_closed() -> Select<Entity> {
        Self::find().filter(Column::Status.eq(CycleStatus::Closed))
    }
}

impl Model {
    pub fn is_active(&self) -> bool {
        self.status == CycleStatus::Active
    }
}
