//! Leaser rate tables and coefficient resolution

mod resolver;
mod table;
pub mod loader;

pub use loader::{LoadedRateTables, LoadError, DEFAULT_RATE_TABLES_PATH};
pub use resolver::{max_coefficient, resolve_coefficient};
pub use table::{
    DurationCoefficient, Range, RateTable, RateTableError, DEFAULT_DURATION_MONTHS,
    DEFAULT_FALLBACK_COEFFICIENT, MAX_FALLBACK_COEFFICIENT,
};
