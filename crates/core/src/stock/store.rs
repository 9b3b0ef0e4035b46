//! Ledger store seam.
//!
//! The valuation engine never owns ledger data. Host applications implement
//! [`LedgerStore`] over their database; closures work too, which keeps tests
//! and ad-hoc callers free of boilerplate.

use dashmap::DashMap;
use tracing::warn;

use stockval_shared::types::ProductId;

use super::entry::{RawLedgerRow, StockLedgerEntry};
use crate::valuation::ValuationError;

/// Read access to a product's stock ledger.
pub trait LedgerStore: Send + Sync {
    /// Lists every entry for `product_id`, ordered by `created_at` ascending.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::LedgerUnavailable` if the entries cannot be read.
    fn list_entries(&self, product_id: ProductId) -> Result<Vec<StockLedgerEntry>, ValuationError>;
}

impl<F> LedgerStore for F
where
    F: Fn(ProductId) -> Result<Vec<StockLedgerEntry>, ValuationError> + Send + Sync,
{
    fn list_entries(&self, product_id: ProductId) -> Result<Vec<StockLedgerEntry>, ValuationError> {
        self(product_id)
    }
}

/// In-memory ledger store.
///
/// Entries are kept per product in append order.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    entries: DashMap<ProductId, Vec<StockLedgerEntry>>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validated entry.
    pub fn append(&self, entry: StockLedgerEntry) {
        self.entries.entry(entry.product_id).or_default().push(entry);
    }

    /// Appends a raw row, skipping it if it is malformed.
    ///
    /// Returns true if the row was stored.
    pub fn append_raw(&self, row: RawLedgerRow) -> bool {
        let id = row.id;
        let product_id = row.product_id;
        match StockLedgerEntry::try_from_raw(row) {
            Ok(entry) => {
                self.append(entry);
                true
            }
            Err(reason) => {
                warn!(%product_id, entry_id = %id, %reason, "Skipping malformed ledger row");
                false
            }
        }
    }

    /// Removes every entry of a product.
    pub fn clear(&self, product_id: ProductId) {
        self.entries.remove(&product_id);
    }

    /// Number of entries held for a product.
    #[must_use]
    pub fn entry_count(&self, product_id: ProductId) -> usize {
        self.entries.get(&product_id).map_or(0, |e| e.len())
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn list_entries(&self, product_id: ProductId) -> Result<Vec<StockLedgerEntry>, ValuationError> {
        Ok(self
            .entries
            .get(&product_id)
            .map(|e| e.value().clone())
            .unwrap_or_default())
    }
}
