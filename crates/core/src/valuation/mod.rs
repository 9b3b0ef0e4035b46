//! Inventory valuation.
//!
//! This module values on-hand stock from the stock ledger:
//! - Weighted average cost over receipts
//! - FIFO and LIFO cost layers from a single parameterized replay
//! - Whole-cent rounding, half away from zero
//! - Zero, negative and unknown-cost policies

pub mod average;
pub mod engine;
pub mod error;
pub mod layers;
pub mod rounding;
pub mod types;

#[cfg(test)]
mod benchmark;
#[cfg(test)]
mod engine_props;

pub use average::{AverageCost, compute_average};
pub use engine::ValuationEngine;
pub use error::ValuationError;
pub use layers::{ConsumptionPolicy, CostLayer, LayerReplay, build_layers};
pub use types::{MethodComparison, ValuationMethod, ValuationResult};
