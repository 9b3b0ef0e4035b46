//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockval_shared::types::ProductId;

use crate::valuation::{ValuationMethod, ValuationResult};

/// Authoritative on-hand quantity of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPosition {
    /// Product ID.
    pub product_id: ProductId,
    /// Quantity on hand, as tracked by the inventory store.
    pub qty_on_hand: Decimal,
}

/// Totals across a valuation report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationSummary {
    /// Products in the report.
    pub total_items: usize,
    /// Products with positive stock and a known cost.
    pub valued_items: usize,
    /// Products with stock but no cost history.
    pub unknown_cost_items: usize,
    /// Products with negative stock.
    pub negative_stock_items: usize,
    /// Sum of all values in cents.
    pub total_value_cents: i64,
}

/// Valuation of a set of products under one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryValuationReport {
    /// Method used for every item.
    pub method: ValuationMethod,
    /// Per-product results, in input order.
    pub items: Vec<ValuationResult>,
    /// Totals.
    pub summary: ValuationSummary,
}

impl InventoryValuationReport {
    /// Items that need a cost before they can be valued.
    pub fn unknown_cost_items(&self) -> impl Iterator<Item = &ValuationResult> {
        self.items.iter().filter(|i| i.has_unknown_cost)
    }
}
