//! Valuation engine.
//!
//! Selects the method, applies the zero and negative quantity policies and
//! assembles a [`ValuationResult`]. The engine is stateless and synchronous;
//! concurrent calls share nothing.

use rust_decimal::Decimal;
use tracing::debug;

use stockval_shared::types::ProductId;

use super::average::compute_average;
use super::error::ValuationError;
use super::layers::{ConsumptionPolicy, build_layers};
use super::types::{MethodComparison, ValuationMethod, ValuationResult};
use crate::stock::{LedgerStore, StockLedgerEntry, sort_for_replay};

/// Valuation engine.
///
/// Pure business logic: ledger reads are delegated to a [`LedgerStore`].
pub struct ValuationEngine;

impl ValuationEngine {
    /// Values a product from a ledger snapshot already in replay order.
    ///
    /// - `qty_on_hand == 0` short-circuits to the zero result.
    /// - `qty_on_hand < 0` reports a zero value; the average cost and layers
    ///   are still computed for display.
    /// - No receipts with non-zero stock sets `has_unknown_cost`.
    #[must_use]
    pub fn compute(
        product_id: ProductId,
        qty_on_hand: Decimal,
        method: ValuationMethod,
        entries: &[StockLedgerEntry],
    ) -> ValuationResult {
        if qty_on_hand.is_zero() {
            return ValuationResult::zero(product_id, method, qty_on_hand);
        }

        let result = match method.policy() {
            None => Self::compute_average(product_id, qty_on_hand, entries),
            Some(policy) => Self::compute_layered(product_id, qty_on_hand, policy, entries),
        };

        debug!(
            %product_id,
            %method,
            qty_on_hand = %result.qty_on_hand,
            value_cents = result.value_cents,
            has_unknown_cost = result.has_unknown_cost,
            "Valuation computed"
        );

        result
    }

    /// Fetches the product's ledger from `store` and values it.
    ///
    /// The store is not consulted when `qty_on_hand` is zero.
    pub fn compute_valuation<S>(
        store: &S,
        product_id: ProductId,
        qty_on_hand: Decimal,
        method: ValuationMethod,
    ) -> Result<ValuationResult, ValuationError>
    where
        S: LedgerStore + ?Sized,
    {
        if qty_on_hand.is_zero() {
            return Ok(ValuationResult::zero(product_id, method, qty_on_hand));
        }

        let entries = Self::fetch(store, product_id)?;
        Ok(Self::compute(product_id, qty_on_hand, method, &entries))
    }

    /// Like [`Self::compute_valuation`], with the method given by name.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::UnsupportedMethod` before any ledger read if
    /// the name is not AVERAGE, FIFO or LIFO.
    pub fn compute_valuation_by_name<S>(
        store: &S,
        product_id: ProductId,
        qty_on_hand: Decimal,
        method: &str,
    ) -> Result<ValuationResult, ValuationError>
    where
        S: LedgerStore + ?Sized,
    {
        let method: ValuationMethod = method.parse()?;
        Self::compute_valuation(store, product_id, qty_on_hand, method)
    }

    /// Values one ledger snapshot under every method.
    #[must_use]
    pub fn compare_methods(
        product_id: ProductId,
        qty_on_hand: Decimal,
        entries: &[StockLedgerEntry],
    ) -> MethodComparison {
        MethodComparison {
            average: Self::compute(product_id, qty_on_hand, ValuationMethod::Average, entries),
            fifo: Self::compute(product_id, qty_on_hand, ValuationMethod::Fifo, entries),
            lifo: Self::compute(product_id, qty_on_hand, ValuationMethod::Lifo, entries),
        }
    }

    /// Fetches the product's ledger and compares every method on it.
    pub fn compare_methods_from_store<S>(
        store: &S,
        product_id: ProductId,
        qty_on_hand: Decimal,
    ) -> Result<MethodComparison, ValuationError>
    where
        S: LedgerStore + ?Sized,
    {
        let entries = if qty_on_hand.is_zero() {
            Vec::new()
        } else {
            Self::fetch(store, product_id)?
        };
        Ok(Self::compare_methods(product_id, qty_on_hand, &entries))
    }

    fn fetch<S>(store: &S, product_id: ProductId) -> Result<Vec<StockLedgerEntry>, ValuationError>
    where
        S: LedgerStore + ?Sized,
    {
        let mut entries = store.list_entries(product_id)?;
        // Stores promise ascending order; a stable sort keeps ties in insertion order.
        sort_for_replay(&mut entries);
        Ok(entries)
    }

    fn compute_average(
        product_id: ProductId,
        qty_on_hand: Decimal,
        entries: &[StockLedgerEntry],
    ) -> ValuationResult {
        let average = compute_average(entries, qty_on_hand);

        ValuationResult {
            product_id,
            method: ValuationMethod::Average,
            qty_on_hand,
            value_cents: average.value_cents,
            avg_cost_cents: average.avg_cost_cents,
            fifo_layers: None,
            lifo_layers: None,
            has_unknown_cost: average.has_unknown_cost,
            oversold_quantity: Decimal::ZERO,
        }
    }

    fn compute_layered(
        product_id: ProductId,
        qty_on_hand: Decimal,
        policy: ConsumptionPolicy,
        entries: &[StockLedgerEntry],
    ) -> ValuationResult {
        let replay = build_layers(entries, policy);

        let has_unknown_cost = replay.receipt_count == 0;
        let value_cents = if qty_on_hand > Decimal::ZERO {
            replay.value_cents().max(0)
        } else {
            0
        };
        let avg_cost_cents = replay.avg_cost_cents();
        let oversold_quantity = replay.unmatched_quantity;

        let (method, fifo_layers, lifo_layers) = match policy {
            ConsumptionPolicy::OldestFirst => (ValuationMethod::Fifo, Some(replay.layers), None),
            ConsumptionPolicy::NewestFirst => (ValuationMethod::Lifo, None, Some(replay.layers)),
        };

        ValuationResult {
            product_id,
            method,
            qty_on_hand,
            value_cents,
            avg_cost_cents,
            fifo_layers,
            lifo_layers,
            has_unknown_cost,
            oversold_quantity,
        }
    }
}
