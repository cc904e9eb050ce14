//! Repository layer for database operations
//!
//! Every method takes an explicit `&mut PgConnection` executor so that a
//! single `sqlx::Transaction` visibly spans every statement of one logical
//! operation. No business logic lives here.

pub mod account;
pub mod order;

pub use account::AccountRepository;
pub use order::OrderRepository;
