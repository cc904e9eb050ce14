//! bonusledger - Loyalty order tracking and bonus ledger engine
//!
//! Tracks user loyalty orders, converts externally-computed accrual results
//! into authoritative balance changes, and lets users spend accumulated
//! balance against new orders.
//!
//! # Modules
//!
//! - [`model`] - Orders, accounts and the append-only operation ledger
//! - [`checksum`] - Mod-10 validation of order numbers
//! - [`error`] - Core error taxonomy
//! - [`db`] - PostgreSQL pool and schema bootstrap
//! - [`repository`] - CRUD and row-lock primitives over the three tables
//! - [`service`] - Order submission/listing and the balance/withdrawal path
//! - [`recon`] - Scanner, dispatch seam and the reconciliation processor
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup

pub mod checksum;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod recon;
pub mod repository;
pub mod service;

// Convenient re-exports at crate root
pub use checksum::check_order_number;
pub use config::AppConfig;
pub use db::Database;
pub use error::LedgerError;
pub use model::{
    Account, Balance, Operation, OperationType, Order, OrderStatus, OrderView, Withdrawal,
};
pub use recon::{
    AccrualOracle, AccrualReply, AccrualStatus, ChannelDispatcher, DispatchTarget, DispatchWorker,
    HttpAccrualClient, Processor, Scanner,
};
pub use repository::{AccountRepository, OrderRepository};
pub use service::{BalanceService, OrderService};
