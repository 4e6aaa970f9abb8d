//! Coefficient resolution against a leaser's rate table
//!
//! Resolution is deliberately total: a missing table, an unmatched amount
//! or an absent duration override all degrade to a usable coefficient
//! instead of failing. Offer pricing must never hard-fail on incomplete
//! rate configuration; fallbacks are logged so they stay visible.

use log::{debug, warn};

use super::table::{RateTable, DEFAULT_FALLBACK_COEFFICIENT, MAX_FALLBACK_COEFFICIENT};

/// Resolve the coefficient (percentage) for a financed amount and
/// contract duration.
///
/// Lookup order:
/// 1. first range containing `amount` (both bounds inclusive, stored order);
/// 2. exact duration override inside that range, else its scalar coefficient;
/// 3. no matching range: first range's scalar coefficient;
/// 4. missing/empty table: [`DEFAULT_FALLBACK_COEFFICIENT`].
pub fn resolve_coefficient(table: Option<&RateTable>, amount: f64, duration_months: u32) -> f64 {
    let table = match table {
        Some(t) if !t.is_empty() => t,
        _ => {
            warn!(
                "no rate table available for amount {:.2}, using fallback coefficient {}",
                amount, DEFAULT_FALLBACK_COEFFICIENT
            );
            return DEFAULT_FALLBACK_COEFFICIENT;
        }
    };

    // First match wins; validated tables are sorted and non-overlapping
    match table.ranges.iter().find(|r| r.contains(amount)) {
        Some(range) => range.coefficient_for(duration_months),
        None => {
            let first = &table.ranges[0];
            debug!(
                "amount {:.2} outside ranges of rate table '{}', falling back to first range coefficient {}",
                amount, table.name, first.coefficient
            );
            first.coefficient
        }
    }
}

/// Maximum coefficient anywhere in the table (scalar or duration override).
///
/// Used before the financed amount is known, to quote a conservative
/// worst-case monthly payment. Falls back to
/// [`MAX_FALLBACK_COEFFICIENT`] on a missing/empty table.
pub fn max_coefficient(table: Option<&RateTable>) -> f64 {
    let table = match table {
        Some(t) if !t.is_empty() => t,
        _ => return MAX_FALLBACK_COEFFICIENT,
    };

    table
        .ranges
        .iter()
        .flat_map(|r| {
            std::iter::once(r.coefficient)
                .chain(r.duration_coefficients.iter().map(|dc| dc.coefficient))
        })
        .fold(f64::MIN, f64::max)
}
