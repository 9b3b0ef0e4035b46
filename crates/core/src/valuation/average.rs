//! Weighted average cost.
//!
//! The average is taken over receipts only. Consumption never enters the
//! numerator or the denominator, so the result reflects the cost of
//! everything ever received, independent of sale ordering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{divide_round, round_cents};
use crate::stock::StockLedgerEntry;

/// Weighted average cost of a product's receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AverageCost {
    /// Average unit cost in cents.
    pub avg_cost_cents: i64,
    /// On-hand value in cents.
    pub value_cents: i64,
    /// Stock exists but no receipt was ever recorded.
    pub has_unknown_cost: bool,
    /// Total quantity received.
    pub receipt_quantity: Decimal,
}

/// Computes the weighted average cost and the value of `qty_on_hand`.
///
/// When `qty_on_hand` equals the total received quantity, the value is the
/// exact total receipt value; otherwise it is `qty_on_hand * avg_cost_cents`.
/// Non-positive quantities are valued at zero. Sums that leave the
/// `Decimal` range saturate instead of failing.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use rust_decimal_macros::dec;
/// use stockval_core::stock::StockLedgerEntry;
/// use stockval_core::valuation::compute_average;
/// use stockval_shared::types::ProductId;
///
/// let product = ProductId::new();
/// let entries = vec![
///     StockLedgerEntry::receipt(product, dec!(100), 1000, Utc::now()),
///     StockLedgerEntry::receipt(product, dec!(50), 1200, Utc::now()),
/// ];
/// let avg = compute_average(&entries, dec!(100));
/// assert_eq!(avg.avg_cost_cents, 1067);
/// assert_eq!(avg.value_cents, 106_700);
/// ```
#[must_use]
pub fn compute_average(entries: &[StockLedgerEntry], qty_on_hand: Decimal) -> AverageCost {
    let (receipt_quantity, receipt_value) = entries
        .iter()
        .filter(|e| e.is_receipt())
        .fold((Decimal::ZERO, Decimal::ZERO), |(qty, value), e| {
            let cost = e.quantity.saturating_mul(Decimal::from(e.unit_cost_cents));
            (qty.saturating_add(e.quantity), value.saturating_add(cost))
        });

    if receipt_quantity.is_zero() {
        return AverageCost {
            avg_cost_cents: 0,
            value_cents: 0,
            has_unknown_cost: !qty_on_hand.is_zero(),
            receipt_quantity,
        };
    }

    let avg_cost_cents = divide_round(receipt_value, receipt_quantity);

    let value_cents = if qty_on_hand <= Decimal::ZERO {
        0
    } else if qty_on_hand == receipt_quantity {
        round_cents(receipt_value)
    } else {
        round_cents(qty_on_hand.saturating_mul(Decimal::from(avg_cost_cents)))
    };

    AverageCost {
        avg_cost_cents,
        value_cents: value_cents.max(0),
        has_unknown_cost: false,
        receipt_quantity,
    }
}
