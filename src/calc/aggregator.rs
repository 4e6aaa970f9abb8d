//! Offer aggregation: reduce equipment lines to a priced result
//!
//! Produces both the "normal" view (each line priced with the coefficient
//! of its own financed amount) and the "adjusted" view (the whole financed
//! amount priced with a single lump-sum coefficient), plus the margin
//! shift between the two. Step order is fixed for reproducibility.

use serde::{Deserialize, Serialize};

use crate::offer::EquipmentLine;
use crate::rates::{resolve_coefficient, RateTable};

/// Aggregated pricing of one offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Sum of unit price x quantity over all lines
    pub total_purchase_price: f64,

    /// Sum of per-line margins, absolute
    pub normal_margin_amount: f64,

    /// Per-line margins relative to the total purchase price
    pub normal_margin_pct: f64,

    /// Sum of per-line monthly payments
    pub normal_monthly_payment: f64,

    /// Total purchase price plus total margin
    pub total_financed_amount: f64,

    /// Coefficient resolved for the financed amount as one lump sum
    pub global_coefficient: f64,

    /// Monthly payment when the lump sum is priced at the global coefficient
    pub adjusted_monthly_payment: f64,

    /// Margin remaining under global-coefficient pricing, absolute
    pub adjusted_margin_amount: f64,

    /// Margin remaining under global-coefficient pricing, relative
    pub adjusted_margin_pct: f64,

    /// Normal minus adjusted margin. Positive means margin is lost by
    /// switching to the global coefficient.
    pub margin_difference: f64,
}

impl CalculationResult {
    /// All-zero result, returned for an empty offer
    pub fn zero() -> Self {
        Self {
            total_purchase_price: 0.0,
            normal_margin_amount: 0.0,
            normal_margin_pct: 0.0,
            normal_monthly_payment: 0.0,
            total_financed_amount: 0.0,
            global_coefficient: 0.0,
            adjusted_monthly_payment: 0.0,
            adjusted_margin_amount: 0.0,
            adjusted_margin_pct: 0.0,
            margin_difference: 0.0,
        }
    }
}

/// Aggregate equipment lines into a [`CalculationResult`].
///
/// Lines without a stored monthly payment are priced per line: the
/// coefficient is resolved against that line's own financed amount. The
/// global coefficient is resolved once against the lump-sum financed
/// amount, never averaged from per-line coefficients. Divisions are
/// guarded so an empty offer yields zeros, not NaN.
pub fn aggregate(
    lines: &[EquipmentLine],
    table: Option<&RateTable>,
    duration_months: u32,
) -> CalculationResult {
    if lines.is_empty() {
        return CalculationResult::zero();
    }

    let total_purchase_price: f64 = lines.iter().map(|l| l.total_price()).sum();
    let normal_margin_amount: f64 = lines.iter().map(|l| l.margin_amount()).sum();

    let normal_margin_pct = if total_purchase_price > 0.0 {
        normal_margin_amount / total_purchase_price * 100.0
    } else {
        0.0
    };

    let total_financed_amount = total_purchase_price + normal_margin_amount;

    let normal_monthly_payment: f64 = lines
        .iter()
        .map(|line| match line.monthly_payment {
            Some(payment) => payment * line.quantity as f64,
            None => {
                let financed = line.financed_amount();
                let coefficient = resolve_coefficient(table, financed, duration_months);
                financed * coefficient / 100.0
            }
        })
        .sum();

    let global_coefficient = resolve_coefficient(table, total_financed_amount, duration_months);
    let adjusted_monthly_payment = total_financed_amount * global_coefficient / 100.0;

    let monthly_payment_ratio = if normal_monthly_payment > 0.0 {
        adjusted_monthly_payment / normal_monthly_payment
    } else {
        1.0
    };

    let adjusted_margin_amount = normal_margin_amount * monthly_payment_ratio;
    let adjusted_margin_pct = if total_purchase_price > 0.0 {
        adjusted_margin_amount / total_purchase_price * 100.0
    } else {
        0.0
    };

    CalculationResult {
        total_purchase_price,
        normal_margin_amount,
        normal_margin_pct,
        normal_monthly_payment,
        total_financed_amount,
        global_coefficient,
        adjusted_monthly_payment,
        adjusted_margin_amount,
        adjusted_margin_pct,
        margin_difference: normal_margin_amount - adjusted_margin_amount,
    }
}
