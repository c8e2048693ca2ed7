//! Back-office statistics: lead and conversion counts plus the
//! income-to-expense ratio.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Decimal places kept on the income/expense ratio.
pub const RATIO_DECIMAL_PLACES: u32 = 2;

/// Raw aggregates read from the entity store in a single query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsTotals {
    pub potential_clients: i64,
    pub active_clients: i64,
    /// Sum of every contract amount.
    pub total_income: Decimal,
    /// Sum of every campaign budget.
    pub total_expenses: Decimal,
}

/// The statistics payload served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub potential_clients: i64,
    pub active_clients: i64,
    pub income_expenses_ratio: Decimal,
}

impl From<StatisticsTotals> for Statistics {
    fn from(totals: StatisticsTotals) -> Self {
        Self {
            potential_clients: totals.potential_clients,
            active_clients: totals.active_clients,
            income_expenses_ratio: income_expense_ratio(totals.total_income, totals.total_expenses),
        }
    }
}

/// `income / expenses` rounded half-to-even to two decimal places.
///
/// Zero when income is not positive. Also zero when expenses are not
/// positive, since the quotient is undefined there.
pub fn income_expense_ratio(total_income: Decimal, total_expenses: Decimal) -> Decimal {
    let zero = Decimal::new(0, RATIO_DECIMAL_PLACES);
    if total_income <= Decimal::ZERO || total_expenses <= Decimal::ZERO {
        return zero;
    }
    match total_income.checked_div(total_expenses) {
        Some(ratio) => {
            let mut ratio = ratio
                .round_dp_with_strategy(RATIO_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
            ratio.rescale(RATIO_DECIMAL_PLACES);
            ratio
        }
        None => zero,
    }
}
