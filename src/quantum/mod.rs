//! Superposition bookkeeping and forced collapse.
//!
//! - `QuantumSet`: turn numbers whose pieces are still in two places
//! - `QuantumEngine`: detects forced measurements and performs collapses,
//!   cascading until the board is stable

pub mod set;
pub mod engine;

pub use set::QuantumSet;
pub use engine::{Collapse, ForcedMeasurement, MeasurementReason, QuantumEngine};
