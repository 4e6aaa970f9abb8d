//! Offer input data: equipment line items and CSV import

mod equipment;
pub mod loader;

pub use equipment::EquipmentLine;
pub use loader::{load_equipment_lines, load_equipment_lines_from_reader, EquipmentLoadError};
