//! Rate table data structures for leasing partners ("leasers")
//!
//! A rate table maps financed-amount ranges to coefficients (percentages
//! applied to the financed amount to derive a monthly payment), with
//! optional per-duration overrides inside each range.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback coefficient when no rate table (or no matching range) is
/// available. Mid-range coefficient of the reference rate table.
pub const DEFAULT_FALLBACK_COEFFICIENT: f64 = 3.16;

/// Conservative upper-bound coefficient used when the amount is not yet
/// known. Highest scalar coefficient of the reference rate table.
pub const MAX_FALLBACK_COEFFICIENT: f64 = 3.55;

/// Contract duration assumed when the caller does not specify one
pub const DEFAULT_DURATION_MONTHS: u32 = 36;

/// Coefficient override for a specific contract duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationCoefficient {
    /// Contract duration in months (e.g. 12/24/36/48/60)
    pub duration_months: u32,

    /// Coefficient (percentage) applying at that duration
    pub coefficient: f64,
}

/// One financed-amount bracket of a rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound of the bracket (inclusive)
    pub min: f64,

    /// Upper bound of the bracket (inclusive)
    pub max: f64,

    /// Scalar coefficient (percentage, e.g. 3.55 for 3.55%)
    pub coefficient: f64,

    /// Per-duration overrides of the scalar coefficient
    #[serde(default)]
    pub duration_coefficients: Vec<DurationCoefficient>,
}

impl Range {
    /// Create a range with a scalar coefficient only
    pub fn new(min: f64, max: f64, coefficient: f64) -> Self {
        Self {
            min,
            max,
            coefficient,
            duration_coefficients: Vec::new(),
        }
    }

    /// Create a range with per-duration coefficient overrides
    pub fn with_durations(
        min: f64,
        max: f64,
        coefficient: f64,
        durations: &[(u32, f64)],
    ) -> Self {
        Self {
            min,
            max,
            coefficient,
            duration_coefficients: durations
                .iter()
                .map(|&(duration_months, coefficient)| DurationCoefficient {
                    duration_months,
                    coefficient,
                })
                .collect(),
        }
    }

    /// Check whether an amount falls in this bracket. Both bounds inclusive.
    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }

    /// Coefficient for a given duration: exact-match override first,
    /// scalar coefficient otherwise. No interpolation between durations.
    pub fn coefficient_for(&self, duration_months: u32) -> f64 {
        self.duration_coefficients
            .iter()
            .find(|dc| dc.duration_months == duration_months)
            .map(|dc| dc.coefficient)
            .unwrap_or(self.coefficient)
    }
}

/// Error raised when validating a rate table at construction time
#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("rate table '{table}' has an inverted range [{min}, {max}]")]
    InvertedBounds { table: String, min: f64, max: f64 },

    #[error(
        "rate table '{table}' has overlapping ranges [{first_min}, {first_max}] and [{second_min}, {second_max}]"
    )]
    Overlap {
        table: String,
        first_min: f64,
        first_max: f64,
        second_min: f64,
        second_max: f64,
    },
}

/// A leasing partner's rate card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Leaser name (e.g. "Grenke")
    pub name: String,

    /// Optional logo reference for display layers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Amount brackets in resolution order
    pub ranges: Vec<Range>,
}

impl RateTable {
    /// Create a rate table without validating range layout.
    /// Resolution on such a table is first-match in stored order.
    pub fn new(name: impl Into<String>, ranges: Vec<Range>) -> Self {
        Self {
            name: name.into(),
            logo_url: None,
            ranges,
        }
    }

    /// Create a rate table with ranges sorted by lower bound and
    /// non-overlap enforced. Loaded configuration goes through here so
    /// that data-entry overlaps surface as errors instead of silently
    /// depending on row order.
    pub fn validated(
        name: impl Into<String>,
        mut ranges: Vec<Range>,
    ) -> Result<Self, RateTableError> {
        let name = name.into();

        for range in &ranges {
            if range.min > range.max {
                return Err(RateTableError::InvertedBounds {
                    table: name.clone(),
                    min: range.min,
                    max: range.max,
                });
            }
        }

        ranges.sort_by(|a, b| a.min.total_cmp(&b.min));

        for pair in ranges.windows(2) {
            // Bounds are inclusive, so a shared boundary is an overlap too
            if pair[1].min <= pair[0].max {
                return Err(RateTableError::Overlap {
                    table: name.clone(),
                    first_min: pair[0].min,
                    first_max: pair[0].max,
                    second_min: pair[1].min,
                    second_max: pair[1].max,
                });
            }
        }

        Ok(Self {
            name,
            logo_url: None,
            ranges,
        })
    }

    /// Whether the table carries no usable ranges
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Hardcoded reference rate table matching the default leaser card.
    /// Used when no table is supplied and by the demo binaries.
    pub fn default_reference() -> Self {
        Self::new(
            "Reference",
            vec![
                Range::with_durations(
                    500.0,
                    2_500.0,
                    3.55,
                    &[(18, 5.02), (24, 4.17), (36, 3.55), (48, 3.10), (60, 2.79)],
                ),
                Range::with_durations(
                    2_500.01,
                    5_000.0,
                    3.27,
                    &[(18, 4.75), (24, 3.94), (36, 3.27), (48, 2.85), (60, 2.57)],
                ),
                Range::with_durations(
                    5_000.01,
                    12_500.0,
                    3.16,
                    &[(18, 4.61), (24, 3.72), (36, 3.16), (48, 2.73), (60, 2.47)],
                ),
                Range::with_durations(
                    12_500.01,
                    25_000.0,
                    3.13,
                    &[(18, 4.55), (24, 3.68), (36, 3.13), (48, 2.71), (60, 2.45)],
                ),
                Range::with_durations(
                    25_000.01,
                    50_000.0,
                    3.11,
                    &[(18, 4.52), (24, 3.65), (36, 3.11), (48, 2.69), (60, 2.43)],
                ),
                Range::with_durations(
                    50_000.01,
                    100_000.0,
                    3.07,
                    &[(18, 4.47), (24, 3.61), (36, 3.07), (48, 2.66), (60, 2.40)],
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds_inclusive() {
        let range = Range::new(5_000.0, 12_500.0, 3.16);

        assert!(range.contains(5_000.0));
        assert!(range.contains(12_500.0));
        assert!(range.contains(8_000.0));
        assert!(!range.contains(4_999.99));
        assert!(!range.contains(12_500.01));
    }

    #[test]
    fn test_duration_override_precedence() {
        let range = Range::with_durations(0.0, 10_000.0, 3.16, &[(36, 2.95), (60, 2.40)]);

        assert_eq!(range.coefficient_for(36), 2.95);
        assert_eq!(range.coefficient_for(60), 2.40);
        // No override for 99 months: scalar applies
        assert_eq!(range.coefficient_for(99), 3.16);
    }

    #[test]
    fn test_validated_sorts_ranges() {
        let table = RateTable::validated(
            "Test",
            vec![
                Range::new(10_000.01, 50_000.0, 3.0),
                Range::new(0.0, 10_000.0, 3.5),
            ],
        )
        .unwrap();

        assert_eq!(table.ranges[0].min, 0.0);
        assert_eq!(table.ranges[1].min, 10_000.01);
    }

    #[test]
    fn test_validated_rejects_overlap() {
        let result = RateTable::validated(
            "Test",
            vec![
                Range::new(0.0, 10_000.0, 3.5),
                Range::new(10_000.0, 50_000.0, 3.0),
            ],
        );

        assert!(matches!(result, Err(RateTableError::Overlap { .. })));
    }

    #[test]
    fn test_validated_rejects_inverted_bounds() {
        let result = RateTable::validated("Test", vec![Range::new(5_000.0, 500.0, 3.5)]);

        assert!(matches!(
            result,
            Err(RateTableError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_default_reference_table() {
        let table = RateTable::default_reference();

        assert!(!table.is_empty());
        // Mid-range 36-month coefficient matches the fallback constant
        let mid = table.ranges.iter().find(|r| r.contains(10_000.0)).unwrap();
        assert_eq!(mid.coefficient_for(36), DEFAULT_FALLBACK_COEFFICIENT);
        // Reference layout is valid under the construction invariant
        assert!(RateTable::validated("Reference", table.ranges.clone()).is_ok());
    }
}
