//! Data models for orders, accounts and the operation ledger

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Order lifecycle status
///
/// Stored as text in PostgreSQL. Terminal states: INVALID, PROCESSED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Just submitted, not yet seen by the reconciliation engine
    New,
    /// Accepted by the accrual oracle, accrual not computed yet
    Registered,
    /// Accrual computation in progress
    Processing,
    /// Terminal: oracle rejected the order, no accrual will ever be paid
    Invalid,
    /// Terminal: accrual computed and credited
    Processed,
}

impl OrderStatus {
    /// Check if no more transitions are possible
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Invalid | OrderStatus::Processed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Registered => "REGISTERED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Invalid => "INVALID",
            OrderStatus::Processed => "PROCESSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(OrderStatus::New),
            "REGISTERED" => Some(OrderStatus::Registered),
            "PROCESSING" => Some(OrderStatus::Processing),
            "INVALID" => Some(OrderStatus::Invalid),
            "PROCESSED" => Some(OrderStatus::Processed),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loyalty order as persisted
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub number: String,
    pub status: OrderStatus,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One account per user; running totals are a projection of the operations
/// ledger and must satisfy `balance == total_credited - total_debited` at
/// every committed state.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub balance: Decimal,
    pub total_debited: Decimal,
    pub total_credited: Decimal,
}

/// Signed purpose of a ledger operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Increases the balance (accrual paid out)
    Credit,
    /// Decreases the balance (withdrawal)
    Debit,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Credit => "CREDIT",
            OperationType::Debit => "DEBIT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREDIT" => Some(OperationType::Credit),
            "DEBIT" => Some(OperationType::Debit),
            _ => None,
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only ledger entry. Never updated or deleted after insertion.
#[derive(Debug, Clone)]
pub struct Operation {
    pub id: i64,
    pub account_id: i64,
    /// Set for credits (the order that produced the accrual); withdrawals
    /// reference an externally known order number only.
    pub order_id: Option<i64>,
    pub order_number: String,
    pub op_type: OperationType,
    pub amount: Decimal,
    pub processed_at: DateTime<Utc>,
}

/// Debit history projection for one user
#[derive(Debug, Clone, serde::Serialize)]
pub struct Withdrawal {
    pub order_number: String,
    pub amount: Decimal,
    pub processed_at: DateTime<Utc>,
}

/// Order projected to the external view, annotated with the credited amount
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderView {
    pub number: String,
    pub status: String,
    pub accrual: Decimal,
    pub uploaded_at: DateTime<Utc>,
}

/// Balance view for one user
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Balance {
    pub current: Decimal,
    pub withdrawn: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Invalid.is_terminal());
        assert!(OrderStatus::Processed.is_terminal());

        assert!(!OrderStatus::New.is_terminal());
        assert!(!OrderStatus::Registered.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::New,
            OrderStatus::Registered,
            OrderStatus::Processing,
            OrderStatus::Invalid,
            OrderStatus::Processed,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("HALTED"), None);
        assert_eq!(OrderStatus::parse("new"), None);
    }

    #[test]
    fn test_operation_type_parse() {
        assert_eq!(OperationType::parse("CREDIT"), Some(OperationType::Credit));
        assert_eq!(OperationType::parse("DEBIT"), Some(OperationType::Debit));
        assert_eq!(OperationType::parse("REFUND"), None);
    }
}
