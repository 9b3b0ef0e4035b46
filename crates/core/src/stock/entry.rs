//! Stock ledger entries as read by the valuation engine.
//!
//! Entries are owned by the ledger store and are immutable here. The sign of
//! `quantity` is the only thing the engine branches on: positive quantities
//! are receipts, negative quantities are consumption.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockval_shared::types::{LedgerEntryId, ProductId};

use crate::valuation::rounding::round_cents;

/// Classification tag of a stock movement. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MovementReason {
    /// Goods received from a supplier.
    Receipt,
    /// Goods sold.
    Sale,
    /// Manual stock increase.
    AdjustmentIn,
    /// Manual stock decrease (shrinkage, damage).
    AdjustmentOut,
    /// Goods returned by a customer.
    Return,
    /// Any tag this engine does not know about.
    Other(String),
}

impl MovementReason {
    /// Returns the canonical tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Receipt => "receipt",
            Self::Sale => "sale",
            Self::AdjustmentIn => "adjustment_in",
            Self::AdjustmentOut => "adjustment_out",
            Self::Return => "return",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for MovementReason {
    fn from(tag: String) -> Self {
        match tag.to_lowercase().as_str() {
            "receipt" | "purchase" => Self::Receipt,
            "sale" => Self::Sale,
            "adjustment_in" => Self::AdjustmentIn,
            "adjustment_out" => Self::AdjustmentOut,
            "return" => Self::Return,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for MovementReason {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<MovementReason> for String {
    fn from(reason: MovementReason) -> Self {
        reason.as_str().to_string()
    }
}

impl std::fmt::Display for MovementReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLedgerEntry {
    /// Entry ID.
    pub id: LedgerEntryId,
    /// Product the movement belongs to.
    pub product_id: ProductId,
    /// Signed quantity. Positive = receipt, negative = consumption. Never zero.
    pub quantity: Decimal,
    /// Cost per unit in cents. Only meaningful on receipts.
    pub unit_cost_cents: i64,
    /// Movement classification.
    pub reason: MovementReason,
    /// Ordering timestamp.
    pub created_at: DateTime<Utc>,
    /// Running balance after this movement (audit only).
    pub balance_after: Decimal,
}

impl StockLedgerEntry {
    /// Creates a receipt entry.
    #[must_use]
    pub fn receipt(
        product_id: ProductId,
        quantity: Decimal,
        unit_cost_cents: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::new(),
            product_id,
            quantity: quantity.abs(),
            unit_cost_cents,
            reason: MovementReason::Receipt,
            created_at,
            balance_after: Decimal::ZERO,
        }
    }

    /// Creates a sale entry. `quantity` is the number of units sold.
    #[must_use]
    pub fn sale(product_id: ProductId, quantity: Decimal, created_at: DateTime<Utc>) -> Self {
        Self {
            id: LedgerEntryId::new(),
            product_id,
            quantity: -quantity.abs(),
            unit_cost_cents: 0,
            reason: MovementReason::Sale,
            created_at,
            balance_after: Decimal::ZERO,
        }
    }

    /// Returns true if this entry adds stock.
    #[must_use]
    pub fn is_receipt(&self) -> bool {
        self.quantity.is_sign_positive() && !self.quantity.is_zero()
    }

    /// Returns true if this entry removes stock.
    #[must_use]
    pub fn is_consumption(&self) -> bool {
        self.quantity.is_sign_negative() && !self.quantity.is_zero()
    }

    /// Validates a raw store row.
    ///
    /// Rows with a non-finite or zero quantity, or a non-finite cost, are
    /// rejected. Negative costs are clamped to zero and fractional costs are
    /// rounded half away from zero to whole cents.
    pub fn try_from_raw(row: RawLedgerRow) -> Result<Self, RowRejection> {
        if !row.quantity.is_finite() {
            return Err(RowRejection::NonFiniteQuantity);
        }
        if !row.unit_cost_cents.is_finite() {
            return Err(RowRejection::NonFiniteCost);
        }

        let quantity = Decimal::from_f64(row.quantity).ok_or(RowRejection::NonFiniteQuantity)?;
        if quantity.is_zero() {
            return Err(RowRejection::ZeroQuantity);
        }

        let cost = Decimal::from_f64(row.unit_cost_cents).ok_or(RowRejection::NonFiniteCost)?;
        let unit_cost_cents = round_cents(cost.max(Decimal::ZERO));

        let balance_after = if row.balance_after.is_finite() {
            Decimal::from_f64(row.balance_after).unwrap_or_default()
        } else {
            Decimal::ZERO
        };

        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            quantity,
            unit_cost_cents,
            reason: MovementReason::from(row.reason),
            created_at: row.created_at,
            balance_after,
        })
    }
}

/// A ledger row as a store may hold it before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLedgerRow {
    /// Entry ID.
    pub id: LedgerEntryId,
    /// Product the movement belongs to.
    pub product_id: ProductId,
    /// Signed quantity as stored.
    pub quantity: f64,
    /// Cost per unit in cents as stored.
    pub unit_cost_cents: f64,
    /// Movement classification tag.
    pub reason: String,
    /// Ordering timestamp.
    pub created_at: DateTime<Utc>,
    /// Running balance as stored.
    pub balance_after: f64,
}

/// Why a raw row was left out of valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowRejection {
    /// Quantity is NaN, infinite or outside the decimal range.
    #[error("Quantity is not a finite number")]
    NonFiniteQuantity,

    /// Cost is NaN, infinite or outside the decimal range.
    #[error("Unit cost is not a finite number")]
    NonFiniteCost,

    /// A zero-movement entry carries no information.
    #[error("Quantity cannot be zero")]
    ZeroQuantity,
}

/// Orders entries for replay: ascending `created_at`, ties keep their
/// original (insertion) order.
pub fn sort_for_replay(entries: &mut [StockLedgerEntry]) {
    entries.sort_by_key(|e| e.created_at);
}
