//! Core business logic for Stockval.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It values a product's on-hand stock by replaying its stock ledger.
//!
//! # Modules
//!
//! - `stock` - Stock ledger entries and the ledger store seam
//! - `valuation` - Weighted average, FIFO and LIFO valuation
//! - `reports` - Batch valuation across many products

pub mod reports;
pub mod stock;
pub mod valuation;
