//! Stock ledger entries and the ledger store seam.

pub mod entry;
pub mod store;

pub use entry::{MovementReason, RawLedgerRow, RowRejection, StockLedgerEntry, sort_for_replay};
pub use store::{InMemoryLedgerStore, LedgerStore};
