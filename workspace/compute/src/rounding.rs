//! Rounding helpers reproducing the numeric formatting the web client
//! expects (`Math.round` and `toFixed(0)`).

use rust_decimal::{Decimal, RoundingStrategy};

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `Math.round`: halves go towards positive infinity.
///
/// Values too close to `Decimal::MAX` to take the half are already whole
/// and come back unchanged.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.checked_add(HALF).map_or(value, |v| v.floor())
}

/// `Math.round(x * 100) / 100`
pub fn round_two_places(value: Decimal) -> Decimal {
    match value.checked_mul(HUNDRED) {
        Some(scaled) => round_half_up(scaled) / HUNDRED,
        None => value.round_dp_with_strategy(2, RoundingStrategy::MidpointTowardZero),
    }
}

/// `part / whole * 100`, or zero when `whole` is zero or the percentage
/// does not fit in a `Decimal`.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// `toFixed(0)`: halves go away from zero.
pub fn format_whole_percent(value: Decimal) -> String {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// Amount without trailing zeros, e.g. `4000.0` -> `4000`, `12.50` -> `12.5`.
pub fn format_amount(value: Decimal) -> String {
    value.normalize().to_string()
}
