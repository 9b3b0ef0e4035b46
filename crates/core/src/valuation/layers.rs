//! Cost layer replay shared by FIFO and LIFO.
//!
//! Receipts open a layer at the back of a deque. Consumption drains layers from
//! the front (oldest first) or the back (newest first). Exhausted layers are
//! popped immediately, so every open layer holds a positive quantity and each
//! consumption step is O(1) amortized over the whole replay.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rounding::{divide_round, round_cents};
use crate::stock::StockLedgerEntry;

/// Which open layer consumption draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumptionPolicy {
    /// FIFO: the earliest remaining layer.
    OldestFirst,
    /// LIFO: the latest remaining layer.
    NewestFirst,
}

/// A surviving slice of a past receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLayer {
    /// Units still on hand from this receipt.
    pub quantity_remaining: Decimal,
    /// Receipt cost per unit in cents.
    pub unit_cost_cents: i64,
    /// When the receipt was recorded.
    pub created_at: DateTime<Utc>,
}

impl CostLayer {
    /// Exact value of the layer in cents, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.quantity_remaining
            .saturating_mul(Decimal::from(self.unit_cost_cents))
    }
}

/// Outcome of replaying a ledger into cost layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerReplay {
    /// Remaining layers: oldest first for `OldestFirst`, newest first for `NewestFirst`.
    pub layers: Vec<CostLayer>,
    /// Number of receipt entries seen.
    pub receipt_count: usize,
    /// Consumption left over after every layer was exhausted.
    pub unmatched_quantity: Decimal,
}

impl LayerReplay {
    /// Sum of remaining quantities.
    #[must_use]
    pub fn total_quantity(&self) -> Decimal {
        self.layers
            .iter()
            .map(|l| l.quantity_remaining)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of layer values in cents, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.layers
            .iter()
            .map(CostLayer::value)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of layer values rounded to whole cents.
    #[must_use]
    pub fn value_cents(&self) -> i64 {
        round_cents(self.total_value())
    }

    /// Blended unit cost of the remaining layers, 0 if none remain.
    #[must_use]
    pub fn avg_cost_cents(&self) -> i64 {
        divide_round(self.total_value(), self.total_quantity())
    }
}

/// Replays `entries` (already in `created_at` order) into cost layers.
///
/// Consumption beyond the remaining layers is discarded; its total is
/// reported in `unmatched_quantity`.
#[must_use]
pub fn build_layers(entries: &[StockLedgerEntry], policy: ConsumptionPolicy) -> LayerReplay {
    let mut open: VecDeque<CostLayer> = VecDeque::new();
    let mut receipt_count = 0;
    let mut unmatched_quantity = Decimal::ZERO;

    for entry in entries {
        if entry.is_receipt() {
            receipt_count += 1;
            open.push_back(CostLayer {
                quantity_remaining: entry.quantity,
                unit_cost_cents: entry.unit_cost_cents,
                created_at: entry.created_at,
            });
        } else if entry.is_consumption() {
            let left = consume(&mut open, entry.quantity.abs(), policy);
            if !left.is_zero() {
                debug!(
                    product_id = %entry.product_id,
                    entry_id = %entry.id,
                    unmatched = %left,
                    "Consumption exceeds recorded receipts"
                );
                unmatched_quantity = unmatched_quantity.saturating_add(left);
            }
        }
    }

    let mut layers: Vec<CostLayer> = open.into_iter().collect();
    if policy == ConsumptionPolicy::NewestFirst {
        layers.reverse();
    }

    LayerReplay {
        layers,
        receipt_count,
        unmatched_quantity,
    }
}

/// Draws `to_consume` units from the open layers. Returns what could not be matched.
fn consume(
    open: &mut VecDeque<CostLayer>,
    mut to_consume: Decimal,
    policy: ConsumptionPolicy,
) -> Decimal {
    while to_consume > Decimal::ZERO {
        let layer = match policy {
            ConsumptionPolicy::OldestFirst => open.front_mut(),
            ConsumptionPolicy::NewestFirst => open.back_mut(),
        };
        let Some(layer) = layer else {
            break;
        };

        let take = to_consume.min(layer.quantity_remaining);
        layer.quantity_remaining -= take;
        to_consume -= take;

        if layer.quantity_remaining.is_zero() {
            match policy {
                ConsumptionPolicy::OldestFirst => open.pop_front(),
                ConsumptionPolicy::NewestFirst => open.pop_back(),
            };
        }
    }

    to_consume
}
