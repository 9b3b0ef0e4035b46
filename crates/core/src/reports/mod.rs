//! Inventory valuation reports.
//!
//! Values many products at once for end-of-period and stock-value reporting.

pub mod service;
pub mod types;

pub use service::ValuationReportService;
pub use types::{InventoryValuationReport, StockPosition, ValuationSummary};
