//! Caller-facing services
//!
//! Validation and business rules live here; all persistence goes through the
//! repository layer with explicit transaction boundaries.

pub mod balance;
pub mod order;

pub use balance::BalanceService;
pub use order::OrderService;
