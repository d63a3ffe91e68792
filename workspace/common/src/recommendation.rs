use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Suggested split of a cycle's savings produced by the allocation engine.
///
/// The five amounts always add up to the saved amount the suggestion was
/// computed for. `reasoning` is shown to the user verbatim and in order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    /// Amount to put into the emergency fund
    pub emergency_fund: Decimal,
    /// Amount to invest (index funds, diversified portfolio)
    pub investment: Decimal,
    /// Suggested increase of the systematic investment plan
    pub sip_increase: Decimal,
    /// Amount the user can spend without guilt
    pub guilt_free_spend: Decimal,
    /// Amount for debt repayment or extra goals
    pub debt_payment: Decimal,
    /// Human readable explanation lines
    pub reasoning: Vec<String>,
}

impl AiRecommendation {
    /// Sum of all allocated amounts.
    pub fn total(&self) -> Decimal {
        self.emergency_fund
            + self.investment
            + self.sip_increase
            + self.guilt_free_spend
            + self.debt_payment
    }
}
