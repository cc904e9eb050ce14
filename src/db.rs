//! Database connection management and schema bootstrap

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Idempotent DDL for the three core tables.
///
/// The unique index on `orders.number` is the authority for the
/// one-physical-order-number-one-owner rule; the unique index on
/// `accounts.user_id` enforces one account per user.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL,
        number VARCHAR NOT NULL,
        status VARCHAR NOT NULL,
        uploaded_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    "CREATE UNIQUE INDEX IF NOT EXISTS orders_number_idx ON orders (number)",
    "CREATE INDEX IF NOT EXISTS orders_user_status_idx ON orders (user_id, status)",
    r#"CREATE TABLE IF NOT EXISTS accounts (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL,
        balance NUMERIC NOT NULL DEFAULT 0,
        total_debited NUMERIC NOT NULL DEFAULT 0,
        total_credited NUMERIC NOT NULL DEFAULT 0
    )"#,
    "CREATE UNIQUE INDEX IF NOT EXISTS accounts_user_idx ON accounts (user_id)",
    r#"CREATE TABLE IF NOT EXISTS operations (
        id BIGSERIAL PRIMARY KEY,
        account_id BIGINT NOT NULL,
        order_id BIGINT,
        order_number VARCHAR NOT NULL,
        op_type VARCHAR NOT NULL,
        amount NUMERIC NOT NULL,
        processed_at TIMESTAMPTZ NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS operations_account_idx ON operations (account_id)",
    "CREATE INDEX IF NOT EXISTS operations_order_idx ON operations (order_id)",
];

/// Create the database structure if it does not exist yet
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Database structure initialized");
    Ok(())
}

/// Drop all core tables (test environments only)
pub async fn clear_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for table in ["operations", "accounts", "orders"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    Ok(())
}
