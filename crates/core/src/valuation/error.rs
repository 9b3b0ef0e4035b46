//! Valuation error types.
//!
//! Only two conditions fail a valuation: an unrecognized method name and a
//! ledger store that cannot be read. Everything else (empty ledgers, negative
//! stock, oversold consumption, zero costs) is absorbed into the result.

use stockval_shared::AppError;
use thiserror::Error;

/// Errors that can occur during valuation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// Requested method is not AVERAGE, FIFO or LIFO.
    #[error("Unsupported valuation method: {0}")]
    UnsupportedMethod(String),

    /// The ledger store could not provide the product's entries.
    #[error("Ledger store unavailable: {0}")]
    LedgerUnavailable(String),
}

impl ValuationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedMethod(_) => "UNSUPPORTED_METHOD",
            Self::LedgerUnavailable(_) => "LEDGER_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::UnsupportedMethod(_) => 400,
            Self::LedgerUnavailable(_) => 503,
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// The engine itself is deterministic; only the store can fail transiently.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LedgerUnavailable(_))
    }
}

impl From<ValuationError> for AppError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::UnsupportedMethod(_) => Self::Validation(err.to_string()),
            ValuationError::LedgerUnavailable(_) => Self::ExternalService(err.to_string()),
        }
    }
}
