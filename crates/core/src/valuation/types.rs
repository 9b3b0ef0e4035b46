//! Valuation domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockval_shared::ValuationConfig;
use stockval_shared::types::ProductId;

use super::error::ValuationError;
use super::layers::{ConsumptionPolicy, CostLayer};

/// Accounting convention used to value stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValuationMethod {
    /// Weighted average cost over every receipt.
    Average,
    /// First in, first out.
    Fifo,
    /// Last in, first out.
    Lifo,
}

impl ValuationMethod {
    /// All supported methods, in display order.
    pub const ALL: [Self; 3] = [Self::Average, Self::Fifo, Self::Lifo];

    /// Layer consumption policy, or `None` for the average method.
    #[must_use]
    pub const fn policy(self) -> Option<ConsumptionPolicy> {
        match self {
            Self::Average => None,
            Self::Fifo => Some(ConsumptionPolicy::OldestFirst),
            Self::Lifo => Some(ConsumptionPolicy::NewestFirst),
        }
    }

    /// Reads the configured default method.
    pub fn from_config(config: &ValuationConfig) -> Result<Self, ValuationError> {
        config.default_method.parse()
    }
}

impl std::fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Average => write!(f, "AVERAGE"),
            Self::Fifo => write!(f, "FIFO"),
            Self::Lifo => write!(f, "LIFO"),
        }
    }
}

impl std::str::FromStr for ValuationMethod {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AVERAGE" | "AVG" | "WEIGHTED_AVERAGE" => Ok(Self::Average),
            "FIFO" => Ok(Self::Fifo),
            "LIFO" => Ok(Self::Lifo),
            _ => Err(ValuationError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Valuation of one product's on-hand stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Product valued.
    pub product_id: ProductId,
    /// Method used.
    pub method: ValuationMethod,
    /// Caller-supplied on-hand quantity (passed through).
    pub qty_on_hand: Decimal,
    /// Stock value in cents. Never negative.
    pub value_cents: i64,
    /// Unit cost in cents: the weighted average for AVERAGE, the blended cost
    /// of the remaining layers for FIFO/LIFO.
    pub avg_cost_cents: i64,
    /// Remaining layers, oldest first. Present for FIFO only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifo_layers: Option<Vec<CostLayer>>,
    /// Remaining layers, newest first. Present for LIFO only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifo_layers: Option<Vec<CostLayer>>,
    /// Stock exists but the ledger holds no receipt to cost it.
    pub has_unknown_cost: bool,
    /// Consumption the replay could not match to any receipt (FIFO/LIFO only).
    pub oversold_quantity: Decimal,
}

impl ValuationResult {
    /// The zero result: no value, no cost, no warning.
    #[must_use]
    pub fn zero(product_id: ProductId, method: ValuationMethod, qty_on_hand: Decimal) -> Self {
        Self {
            product_id,
            method,
            qty_on_hand,
            value_cents: 0,
            avg_cost_cents: 0,
            fifo_layers: (method == ValuationMethod::Fifo).then(Vec::new),
            lifo_layers: (method == ValuationMethod::Lifo).then(Vec::new),
            has_unknown_cost: false,
            oversold_quantity: Decimal::ZERO,
        }
    }

    /// Remaining layers for FIFO/LIFO results.
    #[must_use]
    pub fn layers(&self) -> Option<&[CostLayer]> {
        self.fifo_layers
            .as_deref()
            .or(self.lifo_layers.as_deref())
    }
}

/// One ledger snapshot valued under every method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodComparison {
    /// Weighted average valuation.
    pub average: ValuationResult,
    /// FIFO valuation.
    pub fifo: ValuationResult,
    /// LIFO valuation.
    pub lifo: ValuationResult,
}

impl MethodComparison {
    /// Returns the result for a method.
    #[must_use]
    pub fn get(&self, method: ValuationMethod) -> &ValuationResult {
        match method {
            ValuationMethod::Average => &self.average,
            ValuationMethod::Fifo => &self.fifo,
            ValuationMethod::Lifo => &self.lifo,
        }
    }

    /// Largest minus smallest value across methods, in cents.
    #[must_use]
    pub fn value_spread_cents(&self) -> i64 {
        let values = [self.average.value_cents, self.fifo.value_cents, self.lifo.value_cents];
        let max = values.iter().copied().max().unwrap_or_default();
        let min = values.iter().copied().min().unwrap_or_default();
        max.saturating_sub(min)
    }
}
