//! Balance aggregation errors.

use quartermaster_shared::AppError;
use thiserror::Error;

use crate::access::AccessError;
use crate::ledger::StoreError;

/// Errors returned by the balance aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// The caller may not view balances.
    #[error(transparent)]
    AccessDenied(#[from] AccessError),

    /// The requested window is missing, malformed, or inverted.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A ledger sum could not be computed.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

impl BalanceError {
    /// Creates an `InvalidRange` error.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccessDenied(_) => "ACCESS_DENIED",
            Self::InvalidRange(_) => "INVALID_RANGE",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::AccessDenied(_) => 403,
            Self::InvalidRange(_) => 400,
            Self::StoreUnavailable(_) => 500,
        }
    }
}

impl From<BalanceError> for AppError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::AccessDenied(access) => access.into(),
            BalanceError::InvalidRange(msg) => Self::InvalidRange(msg),
            BalanceError::StoreUnavailable(store) => Self::Database(store.to_string()),
        }
    }
}
