//! Offer runner for efficient repeated calculations
//!
//! Pre-loads rate tables once, then allows pricing many offers and
//! projections without re-reading CSV files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calc::{aggregate, project_all, CalculationResult, DurationResult, ProjectionMode};
use crate::offer::EquipmentLine;
use crate::rates::{LoadError, LoadedRateTables, RateTable};

/// Pre-loaded runner for repeated offer calculations
///
/// # Example
/// ```ignore
/// let runner = OfferRunner::from_csv()?;
///
/// // Price the same offer against every loaded leaser
/// for comparison in runner.compare_tables(&lines, 36) {
///     println!("{}: {:.2}/month", comparison.table_name,
///              comparison.result.adjusted_monthly_payment);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OfferRunner {
    /// Pre-loaded leaser rate tables
    tables: Vec<RateTable>,
}

/// One leaser's pricing of an offer, for side-by-side comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaserComparison {
    pub table_name: String,
    pub result: CalculationResult,
}

impl OfferRunner {
    /// Create a runner with the hardcoded reference rate table only
    pub fn new() -> Self {
        Self {
            tables: vec![RateTable::default_reference()],
        }
    }

    /// Create a runner by loading rate tables from the default CSV path
    pub fn from_csv() -> Result<Self, LoadError> {
        Ok(Self {
            tables: LoadedRateTables::load_default()?.tables,
        })
    }

    /// Create a runner from a specific rate table directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, LoadError> {
        Ok(Self {
            tables: LoadedRateTables::load_from(path)?.tables,
        })
    }

    /// Create a runner with pre-built tables
    pub fn with_tables(tables: Vec<RateTable>) -> Self {
        Self { tables }
    }

    /// Loaded tables, in load order
    pub fn tables(&self) -> &[RateTable] {
        &self.tables
    }

    /// Look up a table by leaser name
    pub fn table(&self, name: &str) -> Option<&RateTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Aggregate an offer against one leaser. An unknown or unspecified
    /// name prices with fallback coefficients, consistent with the
    /// resolver's degradation rules.
    pub fn aggregate(
        &self,
        lines: &[EquipmentLine],
        table_name: Option<&str>,
        duration_months: u32,
    ) -> CalculationResult {
        let table = table_name.and_then(|name| self.table(name));
        aggregate(lines, table, duration_months)
    }

    /// Project an amount across durations against one leaser
    pub fn project_all(
        &self,
        amount: f64,
        mode: ProjectionMode,
        table_name: Option<&str>,
        durations: &[u32],
    ) -> BTreeMap<u32, DurationResult> {
        let table = table_name.and_then(|name| self.table(name));
        project_all(amount, mode, table, durations)
    }

    /// Price one offer against every loaded leaser
    pub fn compare_tables(
        &self,
        lines: &[EquipmentLine],
        duration_months: u32,
    ) -> Vec<LeaserComparison> {
        self.tables
            .iter()
            .map(|table| LeaserComparison {
                table_name: table.name.clone(),
                result: aggregate(lines, Some(table), duration_months),
            })
            .collect()
    }
}

impl Default for OfferRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::Range;

    fn sample_lines() -> Vec<EquipmentLine> {
        vec![EquipmentLine::new("Laptop", 1_200.0, 2, 15.0)]
    }

    #[test]
    fn test_runner_matches_direct_aggregation() {
        let runner = OfferRunner::new();
        let lines = sample_lines();

        let via_runner = runner.aggregate(&lines, Some("Reference"), 36);
        let direct = aggregate(&lines, Some(&RateTable::default_reference()), 36);

        assert_eq!(via_runner, direct);
    }

    #[test]
    fn test_unknown_table_degrades_to_fallback() {
        let runner = OfferRunner::new();
        let result = runner.aggregate(&sample_lines(), Some("NoSuchLeaser"), 36);

        assert_eq!(result.global_coefficient, 3.16);
    }

    #[test]
    fn test_compare_tables_one_entry_per_leaser() {
        let runner = OfferRunner::with_tables(vec![
            RateTable::new("Cheap", vec![Range::new(0.0, 1_000_000.0, 3.0)]),
            RateTable::new("Dear", vec![Range::new(0.0, 1_000_000.0, 4.0)]),
        ]);

        let comparisons = runner.compare_tables(&sample_lines(), 36);

        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0].table_name, "Cheap");
        assert!(
            comparisons[0].result.adjusted_monthly_payment
                < comparisons[1].result.adjusted_monthly_payment
        );
    }
}
