//! Ledger Error Types
//!
//! One taxonomy for every core operation. The (excluded) transport layer maps
//! these to status codes via [`LedgerError::code`].

use thiserror::Error;

/// Core error taxonomy
#[derive(Debug, Error)]
pub enum LedgerError {
    // === Validation Errors ===
    #[error("Missing or invalid parameter: {0}")]
    BadParam(&'static str),

    #[error("Order number failed checksum validation")]
    BadOrderNumber,

    // === Duplicate Order Errors ===
    /// The same user already submitted this order number.
    /// Transports report this as a success-duplicate, not a failure.
    #[error("Order already registered by this user")]
    AlreadyRegisteredBySelf,

    #[error("Order already registered by another user")]
    AlreadyRegisteredByOther,

    // === Business Errors ===
    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("No matching row found")]
    NotFound,

    // === Oracle Errors ===
    #[error("Accrual service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Accrual service rate limited the request")]
    RemoteRateLimited,

    #[error("Accrual service returned unexpected status: {0}")]
    UnexpectedState(String),

    // === System Errors ===
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl LedgerError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::BadParam(_) => "BAD_PARAM",
            LedgerError::BadOrderNumber => "BAD_ORDER_NUMBER",
            LedgerError::AlreadyRegisteredBySelf => "ALREADY_REGISTERED_BY_SELF",
            LedgerError::AlreadyRegisteredByOther => "ALREADY_REGISTERED_BY_OTHER",
            LedgerError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            LedgerError::NotFound => "NOT_FOUND",
            LedgerError::RemoteUnavailable(_) => "REMOTE_UNAVAILABLE",
            LedgerError::RemoteRateLimited => "REMOTE_RATE_LIMITED",
            LedgerError::UnexpectedState(_) => "UNEXPECTED_STATE",
            LedgerError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Retryable errors leave the order untouched; the scanner re-discovers
    /// it on a later tick. Validation and business errors are terminal for
    /// the request that produced them.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::RemoteUnavailable(_)
                | LedgerError::RemoteRateLimited
                | LedgerError::Storage(_)
        )
    }
}

/// Check a sqlx error for a PostgreSQL unique violation (SQLSTATE 23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::BadOrderNumber.code(), "BAD_ORDER_NUMBER");
        assert_eq!(LedgerError::InsufficientFunds.code(), "INSUFFICIENT_FUNDS");
        assert_eq!(
            LedgerError::AlreadyRegisteredByOther.code(),
            "ALREADY_REGISTERED_BY_OTHER"
        );
        assert_eq!(LedgerError::RemoteRateLimited.code(), "REMOTE_RATE_LIMITED");
    }

    #[test]
    fn test_retryable_split() {
        assert!(LedgerError::RemoteRateLimited.is_retryable());
        assert!(LedgerError::RemoteUnavailable("boom".into()).is_retryable());
        assert!(LedgerError::Storage(sqlx::Error::PoolClosed).is_retryable());

        assert!(!LedgerError::BadOrderNumber.is_retryable());
        assert!(!LedgerError::InsufficientFunds.is_retryable());
        assert!(!LedgerError::UnexpectedState("HALTED".into()).is_retryable());
    }
}
