//! Rule-based allocation of a cycle's savings.
//!
//! The saved amount decides a [`Tier`], each tier splits the savings into
//! named buckets, and a few advisory lines are appended based on how the
//! salary was spent.

use common::{AiRecommendation, ExpenseBreakdown};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::rounding::{format_amount, format_whole_percent, percent_of, round_half_up};

const FOOD_CATEGORY: &str = "Food";
const ENTERTAINMENT_CATEGORY: &str = "Entertainment";

/// Savings brackets, by absolute saved amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Nothing left over, or worse.
    Overspent,
    /// Below 5 000.
    Low,
    /// 5 000 up to 10 000.
    Moderate,
    /// 10 000 up to 20 000.
    Good,
    /// 20 000 and above.
    Excellent,
}

impl Tier {
    pub fn for_amount(saved: Decimal) -> Self {
        if saved <= Decimal::ZERO {
            Tier::Overspent
        } else if saved < Decimal::from(5_000) {
            Tier::Low
        } else if saved < Decimal::from(10_000) {
            Tier::Moderate
        } else if saved < Decimal::from(20_000) {
            Tier::Good
        } else {
            Tier::Excellent
        }
    }
}

fn share(saved: Decimal, percent: i64) -> Decimal {
    round_half_up(saved * Decimal::new(percent, 2))
}

/// Spend for a category: exact key, then the lowercase key, then any
/// case-insensitive match. Zero amounts count as missing.
fn category_spend(breakdown: &ExpenseBreakdown, category: &str) -> Decimal {
    let lowercase = category.to_lowercase();
    [category, lowercase.as_str()]
        .into_iter()
        .filter_map(|key| breakdown.get(key).copied())
        .find(|amount| !amount.is_zero())
        .or_else(|| {
            breakdown
                .iter()
                .find(|(key, amount)| key.eq_ignore_ascii_case(category) && !amount.is_zero())
                .map(|(_, amount)| *amount)
        })
        .unwrap_or(Decimal::ZERO)
}

fn allocate(saved: Decimal, tier: Tier) -> AiRecommendation {
    let mut rec = AiRecommendation::default();
    let amount = format_amount;

    match tier {
        Tier::Overspent => {
            rec.reasoning.push(
                "⚠️ You overspent this cycle. Review your expenses and try cutting non-essential spending."
                    .to_string(),
            );
        }
        Tier::Low => {
            rec.emergency_fund = saved;
            rec.reasoning.push(format!(
                "Low savings (₹{}). Putting everything into emergency fund.",
                amount(saved)
            ));
            rec.reasoning
                .push("Try to reduce discretionary spending next cycle.".to_string());
        }
        Tier::Moderate => {
            rec.emergency_fund = share(saved, 50);
            rec.investment = share(saved, 30);
            rec.guilt_free_spend = saved - rec.emergency_fund - rec.investment;
            rec.reasoning.push(format!(
                "Moderate savings. Building emergency fund (₹{}) and investing (₹{}).",
                amount(rec.emergency_fund),
                amount(rec.investment)
            ));
            rec.reasoning.push(format!(
                "Enjoy ₹{} guilt-free! 🎉",
                amount(rec.guilt_free_spend)
            ));
        }
        Tier::Good => {
            rec.emergency_fund = share(saved, 30);
            rec.investment = share(saved, 40);
            rec.sip_increase = share(saved, 10);
            rec.guilt_free_spend = saved - rec.emergency_fund - rec.investment - rec.sip_increase;
            rec.reasoning.push(format!(
                "Good savings! Consider increasing SIP by ₹{}.",
                amount(rec.sip_increase)
            ));
            rec.reasoning.push(format!(
                "Investing ₹{} in diversified portfolio.",
                amount(rec.investment)
            ));
            rec.reasoning.push(format!(
                "Emergency: ₹{} | Fun: ₹{}",
                amount(rec.emergency_fund),
                amount(rec.guilt_free_spend)
            ));
        }
        Tier::Excellent => {
            rec.emergency_fund = share(saved, 20);
            rec.investment = share(saved, 40);
            rec.sip_increase = share(saved, 15);
            rec.guilt_free_spend = share(saved, 15);
            rec.debt_payment = saved
                - rec.emergency_fund
                - rec.investment
                - rec.sip_increase
                - rec.guilt_free_spend;
            rec.reasoning
                .push(format!("Excellent savings (₹{})! 🚀", amount(saved)));
            rec.reasoning
                .push(format!("40% Index Funds (₹{})", amount(rec.investment)));
            rec.reasoning
                .push(format!("20% Emergency Fund (₹{})", amount(rec.emergency_fund)));
            rec.reasoning
                .push(format!("15% SIP Increase (₹{})", amount(rec.sip_increase)));
            rec.reasoning
                .push(format!("15% Guilt-Free (₹{})", amount(rec.guilt_free_spend)));
            if rec.debt_payment > Decimal::ZERO {
                rec.reasoning
                    .push(format!("10% Debt/Extra (₹{})", amount(rec.debt_payment)));
            }
        }
    }

    rec
}

fn advise(
    rec: &mut AiRecommendation,
    saved: Decimal,
    breakdown: &ExpenseBreakdown,
    total_salary: Decimal,
) {
    let food_percent = percent_of(category_spend(breakdown, FOOD_CATEGORY), total_salary);
    if food_percent > Decimal::from(20) {
        rec.reasoning.push(format!(
            "💡 Food spending is {}% of salary. Consider meal prepping to save more.",
            format_whole_percent(food_percent)
        ));
    }

    let entertainment_percent =
        percent_of(category_spend(breakdown, ENTERTAINMENT_CATEGORY), total_salary);
    if entertainment_percent > Decimal::from(15) {
        rec.reasoning.push(format!(
            "💡 Entertainment is {}% of salary. Look for free alternatives.",
            format_whole_percent(entertainment_percent)
        ));
    }

    let savings_rate = percent_of(saved, total_salary);
    if savings_rate > Decimal::from(30) {
        rec.reasoning.push(format!(
            "🌟 You saved {}% of your salary. Outstanding discipline!",
            format_whole_percent(savings_rate)
        ));
    } else if savings_rate > Decimal::from(20) {
        rec.reasoning.push(format!(
            "👍 Savings rate: {}%. Above average!",
            format_whole_percent(savings_rate)
        ));
    }
}

/// Splits `saved` into emergency fund, investment, SIP increase, guilt-free
/// spend and debt payment, with human readable reasoning.
///
/// The buckets always add up to `saved` exactly. An overspent cycle gets a
/// single warning and no advice.
#[instrument(skip(breakdown))]
pub fn recommend(
    saved: Decimal,
    breakdown: &ExpenseBreakdown,
    total_salary: Decimal,
) -> AiRecommendation {
    let tier = Tier::for_amount(saved);
    debug!(?tier, "Allocating savings");

    let mut rec = allocate(saved, tier);
    if tier != Tier::Overspent {
        advise(&mut rec, saved, breakdown, total_salary);
    }
    rec
}
