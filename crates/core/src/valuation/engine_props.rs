//! Property-based tests for the valuation engine.
//!
//! - Zero stock is always valued at zero
//! - Missing cost history is flagged, never valued
//! - Valuation is deterministic
//! - Methods agree on receipt-only ledgers
//! - Remaining layers account for the whole on-hand quantity

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use stockval_shared::types::ProductId;
use uuid::Uuid;

use super::engine::ValuationEngine;
use super::types::ValuationMethod;
use crate::stock::StockLedgerEntry;

fn product() -> ProductId {
    ProductId::from_uuid(Uuid::nil())
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// Strategy to generate quantities (0.01 to 500.00).
fn quantity() -> impl Strategy<Value = Decimal> {
    (1i64..50_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy to generate unit costs in cents (0 to 10,000).
fn unit_cost() -> impl Strategy<Value = i64> {
    0i64..10_000i64
}

/// Strategy to generate a valuation method.
fn valuation_method() -> impl Strategy<Value = ValuationMethod> {
    prop_oneof![
        Just(ValuationMethod::Average),
        Just(ValuationMethod::Fifo),
        Just(ValuationMethod::Lifo),
    ]
}

/// Strategy to generate an on-hand quantity that may be negative.
fn signed_quantity() -> impl Strategy<Value = Decimal> {
    (-50_000i64..50_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy to generate arbitrary ledgers (possibly oversold).
fn any_ledger(product: ProductId) -> impl Strategy<Value = Vec<StockLedgerEntry>> {
    prop::collection::vec((any::<bool>(), quantity(), unit_cost()), 0..40).prop_map(
        move |moves| {
            moves
                .into_iter()
                .enumerate()
                .map(|(i, (is_receipt, qty, cost))| {
                    let at = start() + Duration::minutes(i64::try_from(i).unwrap_or_default());
                    if is_receipt {
                        StockLedgerEntry::receipt(product, qty, cost, at)
                    } else {
                        StockLedgerEntry::sale(product, qty, at)
                    }
                })
                .collect()
        },
    )
}

/// Strategy to generate internally consistent ledgers: consumption never
/// exceeds the running balance. Yields the ledger and its net quantity.
fn consistent_ledger(
    product: ProductId,
) -> impl Strategy<Value = (Vec<StockLedgerEntry>, Decimal)> {
    prop::collection::vec((any::<bool>(), quantity(), unit_cost()), 1..40).prop_map(
        move |moves| {
            let mut balance = Decimal::ZERO;
            let mut entries = Vec::with_capacity(moves.len());
            for (i, (is_receipt, qty, cost)) in moves.into_iter().enumerate() {
                let at = start() + Duration::minutes(i64::try_from(i).unwrap_or_default());
                if is_receipt {
                    balance += qty;
                    entries.push(StockLedgerEntry::receipt(product, qty, cost, at));
                } else if balance > Decimal::ZERO {
                    let qty = qty.min(balance);
                    balance -= qty;
                    entries.push(StockLedgerEntry::sale(product, qty, at));
                }
            }
            (entries, balance)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Zero declared stock is worth nothing, whatever the ledger says.
    #[test]
    fn prop_zero_stock_is_zero(
        entries in any_ledger(product()),
        method in valuation_method(),
    ) {
        let result = ValuationEngine::compute(product(), Decimal::ZERO, method, &entries);

        prop_assert_eq!(result.value_cents, 0);
        prop_assert_eq!(result.avg_cost_cents, 0);
        prop_assert!(!result.has_unknown_cost);
    }

    /// Stock without any receipt is flagged and valued at zero.
    #[test]
    fn prop_no_receipts_is_unknown_cost(
        sales in prop::collection::vec(quantity(), 0..10),
        qty in signed_quantity(),
        method in valuation_method(),
    ) {
        prop_assume!(!qty.is_zero());
        let entries: Vec<StockLedgerEntry> = sales
            .into_iter()
            .map(|q| StockLedgerEntry::sale(product(), q, start()))
            .collect();

        let result = ValuationEngine::compute(product(), qty, method, &entries);

        prop_assert!(result.has_unknown_cost);
        prop_assert_eq!(result.value_cents, 0);
    }

    /// Unknown cost is only ever reported when there are no receipts.
    #[test]
    fn prop_unknown_cost_requires_missing_receipts(
        entries in any_ledger(product()),
        qty in signed_quantity(),
        method in valuation_method(),
    ) {
        let result = ValuationEngine::compute(product(), qty, method, &entries);
        let has_receipts = entries.iter().any(StockLedgerEntry::is_receipt);

        prop_assert_eq!(result.has_unknown_cost, !has_receipts && !qty.is_zero());
    }

    /// Values are never negative, and negative stock is valued at zero.
    #[test]
    fn prop_value_is_non_negative(
        entries in any_ledger(product()),
        qty in signed_quantity(),
        method in valuation_method(),
    ) {
        let result = ValuationEngine::compute(product(), qty, method, &entries);

        prop_assert!(result.value_cents >= 0);
        if qty < Decimal::ZERO {
            prop_assert_eq!(result.value_cents, 0);
        }
    }

    /// The same snapshot always yields the same result.
    #[test]
    fn prop_valuation_is_deterministic(
        entries in any_ledger(product()),
        qty in signed_quantity(),
        method in valuation_method(),
    ) {
        let first = ValuationEngine::compute(product(), qty, method, &entries);
        let second = ValuationEngine::compute(product(), qty, method, &entries);

        prop_assert_eq!(first, second);
    }

    /// Receipt-only ledgers valued at their full quantity agree across methods.
    #[test]
    fn prop_methods_agree_without_consumption(
        receipts in prop::collection::vec((quantity(), unit_cost()), 1..20),
    ) {
        let entries: Vec<StockLedgerEntry> = receipts
            .iter()
            .enumerate()
            .map(|(i, (qty, cost))| {
                let at = start() + Duration::minutes(i64::try_from(i).unwrap_or_default());
                StockLedgerEntry::receipt(product(), *qty, *cost, at)
            })
            .collect();
        let qty: Decimal = receipts.iter().map(|(q, _)| *q).sum();

        let comparison = ValuationEngine::compare_methods(product(), qty, &entries);

        prop_assert_eq!(comparison.average.qty_on_hand, qty);
        prop_assert_eq!(comparison.fifo.qty_on_hand, qty);
        prop_assert_eq!(comparison.lifo.qty_on_hand, qty);
        prop_assert_eq!(comparison.average.value_cents, comparison.fifo.value_cents);
        prop_assert_eq!(comparison.fifo.value_cents, comparison.lifo.value_cents);
    }

    /// On a consistent ledger the remaining layers add up to the stock on hand.
    #[test]
    fn prop_layers_sum_to_stock_on_hand(
        (entries, net) in consistent_ledger(product()),
    ) {
        prop_assume!(!net.is_zero());

        for method in [ValuationMethod::Fifo, ValuationMethod::Lifo] {
            let result = ValuationEngine::compute(product(), net, method, &entries);
            let layers = result.layers().unwrap_or_default();
            let total: Decimal = layers.iter().map(|l| l.quantity_remaining).sum();

            prop_assert_eq!(total, net.max(Decimal::ZERO));
            prop_assert_eq!(result.oversold_quantity, Decimal::ZERO);
            prop_assert!(layers.iter().all(|l| l.quantity_remaining > Decimal::ZERO));
        }
    }

    /// FIFO keeps the newest stock and LIFO keeps the oldest, so their layer
    /// timestamps run in opposite directions.
    #[test]
    fn prop_layer_ordering(
        (entries, net) in consistent_ledger(product()),
    ) {
        prop_assume!(!net.is_zero());

        let fifo = ValuationEngine::compute(product(), net, ValuationMethod::Fifo, &entries);
        let lifo = ValuationEngine::compute(product(), net, ValuationMethod::Lifo, &entries);

        let fifo_layers = fifo.fifo_layers.unwrap_or_default();
        let lifo_layers = lifo.lifo_layers.unwrap_or_default();
        prop_assert!(fifo_layers.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        prop_assert!(lifo_layers.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }
}
