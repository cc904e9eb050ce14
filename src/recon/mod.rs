//! Reconciliation engine
//!
//! Discovers unresolved orders (scanner), hands them to the processor
//! through a dispatch seam, and advances each order's lifecycle based on
//! the accrual oracle's verdict, crediting the owner's account exactly once.

pub mod dispatch;
pub mod oracle;
pub mod processor;
pub mod scanner;

pub use dispatch::{ChannelDispatcher, DispatchTarget, DispatchWorker};
pub use oracle::{AccrualOracle, AccrualReply, AccrualStatus, HttpAccrualClient};
pub use processor::Processor;
pub use scanner::Scanner;
