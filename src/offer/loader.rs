//! Load equipment lines from a CSV offer import

use std::path::Path;

use thiserror::Error;

use super::EquipmentLine;

/// Error loading an equipment CSV
#[derive(Debug, Error)]
pub enum EquipmentLoadError {
    #[error("failed to read equipment CSV")]
    Csv(#[from] csv::Error),

    #[error("equipment line '{title}' has zero quantity")]
    ZeroQuantity { title: String },
}

/// Raw CSV row matching the offer export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "PurchasePrice")]
    purchase_price: f64,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "MarginPct")]
    margin_pct: f64,
    #[serde(rename = "MonthlyPayment")]
    monthly_payment: Option<f64>,
}

impl CsvRow {
    fn to_line(self) -> Result<EquipmentLine, EquipmentLoadError> {
        if self.quantity == 0 {
            return Err(EquipmentLoadError::ZeroQuantity { title: self.title });
        }

        Ok(EquipmentLine {
            title: self.title,
            purchase_price: self.purchase_price,
            quantity: self.quantity,
            margin_pct: self.margin_pct,
            monthly_payment: self.monthly_payment,
        })
    }
}

/// Load all equipment lines from a CSV file
pub fn load_equipment_lines<P: AsRef<Path>>(path: P) -> Result<Vec<EquipmentLine>, EquipmentLoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut lines = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        lines.push(row.to_line()?);
    }

    Ok(lines)
}

/// Load equipment lines from any reader (e.g. string buffer)
pub fn load_equipment_lines_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<EquipmentLine>, EquipmentLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut lines = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        lines.push(row.to_line()?);
    }

    Ok(lines)
}
