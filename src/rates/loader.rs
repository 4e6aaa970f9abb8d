//! CSV-based rate table loader
//!
//! Loads leaser rate cards from CSV files in data/rate_tables/:
//! `ranges.csv` holds one bracket per row, `duration_coefficients.csv`
//! holds per-duration overrides keyed by table name and bracket lower
//! bound. Loaded tables go through [`RateTable::validated`], so overlap
//! and inverted-bound data entry errors are rejected at load time.

use std::path::Path;

use thiserror::Error;

use super::table::{DurationCoefficient, Range, RateTable, RateTableError};

/// Default path to the rate table directory
pub const DEFAULT_RATE_TABLES_PATH: &str = "data/rate_tables";

/// Error loading rate tables from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read rate table CSV")]
    Csv(#[from] csv::Error),

    #[error("invalid rate table configuration")]
    Table(#[from] RateTableError),

    #[error("duration override references unknown range (table '{table}', range min {range_min})")]
    UnknownRange { table: String, range_min: f64 },
}

/// Raw CSV row from ranges.csv
#[derive(Debug, serde::Deserialize)]
struct RangeRow {
    #[serde(rename = "Table")]
    table: String,
    #[serde(rename = "Min")]
    min: f64,
    #[serde(rename = "Max")]
    max: f64,
    #[serde(rename = "Coefficient")]
    coefficient: f64,
}

/// Raw CSV row from duration_coefficients.csv
#[derive(Debug, serde::Deserialize)]
struct DurationRow {
    #[serde(rename = "Table")]
    table: String,
    #[serde(rename = "RangeMin")]
    range_min: f64,
    #[serde(rename = "DurationMonths")]
    duration_months: u32,
    #[serde(rename = "Coefficient")]
    coefficient: f64,
}

fn load_range_rows(path: &Path) -> Result<Vec<RangeRow>, LoadError> {
    let mut reader = csv::Reader::from_path(path.join("ranges.csv"))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

fn load_duration_rows(path: &Path) -> Result<Vec<DurationRow>, LoadError> {
    let mut reader = csv::Reader::from_path(path.join("duration_coefficients.csv"))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// All rate tables loaded from a directory
#[derive(Debug, Clone)]
pub struct LoadedRateTables {
    pub tables: Vec<RateTable>,
}

impl LoadedRateTables {
    /// Load all rate tables from the default path
    pub fn load_default() -> Result<Self, LoadError> {
        Self::load_from(Path::new(DEFAULT_RATE_TABLES_PATH))
    }

    /// Load all rate tables from a specific directory
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        let range_rows = load_range_rows(path)?;
        let duration_rows = load_duration_rows(path)?;

        // Group ranges per table, preserving first-appearance order
        let mut tables: Vec<(String, Vec<Range>)> = Vec::new();
        for row in range_rows {
            let idx = match tables.iter().position(|(name, _)| *name == row.table) {
                Some(idx) => idx,
                None => {
                    tables.push((row.table.clone(), Vec::new()));
                    tables.len() - 1
                }
            };
            tables[idx].1.push(Range::new(row.min, row.max, row.coefficient));
        }

        // Attach duration overrides to their brackets
        for row in duration_rows {
            let range = tables
                .iter_mut()
                .find(|(name, _)| *name == row.table)
                .and_then(|(_, ranges)| ranges.iter_mut().find(|r| r.min == row.range_min))
                .ok_or(LoadError::UnknownRange {
                    table: row.table.clone(),
                    range_min: row.range_min,
                })?;
            range.duration_coefficients.push(DurationCoefficient {
                duration_months: row.duration_months,
                coefficient: row.coefficient,
            });
        }

        let tables = tables
            .into_iter()
            .map(|(name, ranges)| RateTable::validated(name, ranges))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tables })
    }

    /// Look up a loaded table by leaser name
    pub fn get(&self, name: &str) -> Option<&RateTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_rate_tables() {
        let result = LoadedRateTables::load_default();
        assert!(result.is_ok(), "Failed to load rate tables: {:?}", result.err());

        let loaded = result.unwrap();
        assert!(loaded.tables.len() >= 2);

        // The shipped Grenke card has the reference bracket layout
        let grenke = loaded.get("Grenke").expect("Grenke table missing");
        assert!(grenke.ranges.len() >= 6);
        assert!(grenke.ranges.iter().any(|r| r.contains(10_000.0)));
        assert!(grenke
            .ranges
            .iter()
            .any(|r| !r.duration_coefficients.is_empty()));

        // Loaded ranges are sorted by the validation pass
        for pair in grenke.ranges.windows(2) {
            assert!(pair[0].max < pair[1].min);
        }

        assert!(loaded.get("NoSuchLeaser").is_none());
    }
}
