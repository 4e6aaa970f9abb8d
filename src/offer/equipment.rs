//! Equipment line items making up a leasing offer

use serde::{Deserialize, Serialize};

/// One catalog item being financed within an offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLine {
    /// Display title of the item
    pub title: String,

    /// Unit purchase price (raw, before margin)
    pub purchase_price: f64,

    /// Number of units
    pub quantity: u32,

    /// Reseller markup percentage on top of the purchase price
    pub margin_pct: f64,

    /// Pre-computed monthly payment per unit, when the author fixed it
    /// by hand instead of deriving it from a coefficient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
}

impl EquipmentLine {
    /// Create a line without a stored monthly payment
    pub fn new(title: impl Into<String>, purchase_price: f64, quantity: u32, margin_pct: f64) -> Self {
        Self {
            title: title.into(),
            purchase_price,
            quantity,
            margin_pct,
            monthly_payment: None,
        }
    }

    /// Create a line with a fixed per-unit monthly payment
    pub fn with_monthly_payment(
        title: impl Into<String>,
        purchase_price: f64,
        quantity: u32,
        margin_pct: f64,
        monthly_payment: f64,
    ) -> Self {
        Self {
            title: title.into(),
            purchase_price,
            quantity,
            margin_pct,
            monthly_payment: Some(monthly_payment),
        }
    }

    /// Purchase price across all units, before margin
    pub fn total_price(&self) -> f64 {
        self.purchase_price * self.quantity as f64
    }

    /// Absolute margin across all units
    pub fn margin_amount(&self) -> f64 {
        self.total_price() * self.margin_pct / 100.0
    }

    /// Amount actually financed: purchase price plus margin
    pub fn financed_amount(&self) -> f64 {
        self.total_price() * (1.0 + self.margin_pct / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_amounts() {
        let line = EquipmentLine::new("Laptop", 1_000.0, 2, 20.0);

        assert_eq!(line.total_price(), 2_000.0);
        assert_eq!(line.margin_amount(), 400.0);
        assert_eq!(line.financed_amount(), 2_400.0);
    }

    #[test]
    fn test_zero_margin() {
        let line = EquipmentLine::new("Screen", 350.0, 3, 0.0);

        assert_eq!(line.margin_amount(), 0.0);
        assert_relative_eq!(line.financed_amount(), line.total_price());
    }
}
