//! Offer pricing calculations: aggregation and duration projections

mod aggregator;
mod projector;

pub use aggregator::{aggregate, CalculationResult};
pub use projector::{project_all, DurationResult, ProjectionMode, STANDARD_DURATIONS};
