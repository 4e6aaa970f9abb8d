//! Leasing Engine - Financial calculation core for equipment leasing offers
//!
//! This library provides:
//! - Coefficient resolution against leaser rate tables with graceful fallbacks
//! - Offer aggregation (purchase price, margin, financed amount, monthly payments)
//! - Multi-duration financing projections, forward (price to rent) and inverse (rent to price)
//! - CSV loading of rate tables and equipment lines
//! - A pre-loaded runner for comparing one offer across many leasers

pub mod rates;
pub mod offer;
pub mod calc;
pub mod scenario;

// Re-export commonly used types
pub use rates::{resolve_coefficient, max_coefficient, RateTable, Range, DurationCoefficient};
pub use offer::EquipmentLine;
pub use calc::{aggregate, project_all, CalculationResult, DurationResult, ProjectionMode};
pub use scenario::OfferRunner;
