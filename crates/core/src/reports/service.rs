//! Batch valuation service.
//!
//! Each product is valued independently, so large batches are spread over
//! the rayon thread pool. Small batches stay on the calling thread.

use rayon::prelude::*;
use tracing::info;

use stockval_shared::ValuationConfig;

use super::types::{InventoryValuationReport, StockPosition, ValuationSummary};
use crate::stock::LedgerStore;
use crate::valuation::{ValuationEngine, ValuationError, ValuationMethod, ValuationResult};

/// Valuation report service.
pub struct ValuationReportService;

impl ValuationReportService {
    /// Values every position under `method`.
    ///
    /// Results keep the order of `positions`. The first ledger read failure
    /// aborts the report.
    pub fn generate<S>(
        store: &S,
        positions: &[StockPosition],
        method: ValuationMethod,
        config: &ValuationConfig,
    ) -> Result<InventoryValuationReport, ValuationError>
    where
        S: LedgerStore + ?Sized,
    {
        let value = |p: &StockPosition| {
            ValuationEngine::compute_valuation(store, p.product_id, p.qty_on_hand, method)
        };

        let items = if positions.len() >= config.parallel_threshold {
            positions.par_iter().map(value).collect::<Result<Vec<_>, _>>()?
        } else {
            positions.iter().map(value).collect::<Result<Vec<_>, _>>()?
        };

        let summary = Self::summarize(&items);

        info!(
            %method,
            total_items = summary.total_items,
            unknown_cost_items = summary.unknown_cost_items,
            total_value_cents = summary.total_value_cents,
            "Inventory valuation report generated"
        );

        Ok(InventoryValuationReport {
            method,
            items,
            summary,
        })
    }

    /// Like [`Self::generate`], using the configured default method.
    pub fn generate_default<S>(
        store: &S,
        positions: &[StockPosition],
        config: &ValuationConfig,
    ) -> Result<InventoryValuationReport, ValuationError>
    where
        S: LedgerStore + ?Sized,
    {
        let method = ValuationMethod::from_config(config)?;
        Self::generate(store, positions, method, config)
    }

    /// Computes report totals.
    #[must_use]
    pub fn summarize(items: &[ValuationResult]) -> ValuationSummary {
        items
            .iter()
            .fold(ValuationSummary::default(), |mut summary, item| {
                summary.total_items += 1;
                if item.has_unknown_cost {
                    summary.unknown_cost_items += 1;
                } else if item.qty_on_hand.is_sign_positive() && !item.qty_on_hand.is_zero() {
                    summary.valued_items += 1;
                }
                if item.qty_on_hand.is_sign_negative() && !item.qty_on_hand.is_zero() {
                    summary.negative_stock_items += 1;
                }
                summary.total_value_cents = summary.total_value_cents.saturating_add(item.value_cents);
                summary
            })
    }
}
