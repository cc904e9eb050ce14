//! bonusledger entry point
//!
//! Wires the ledger core together:
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌───────────┐    ┌───────────┐
//! │ Scanner  │───▶│ Dispatch  │───▶│ Processor │───▶│ Postgres  │
//! │ (tick)   │    │ (channel) │    │ (oracle + │    │ (ledger)  │
//! └──────────┘    └───────────┘    │  tx lock) │    └───────────┘
//!                                  └───────────┘
//! ```
//!
//! The transport layer (HTTP routing, auth) is an external collaborator and
//! consumes `OrderService`, `BalanceService` and `Processor` directly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use bonusledger::config::AppConfig;
use bonusledger::db::{Database, clear_schema, init_schema};
use bonusledger::logging::init_logging;
use bonusledger::recon::{ChannelDispatcher, DispatchWorker, HttpAccrualClient, Processor, Scanner};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    info!(env = %env, "bonusledger starting");

    let db = Arc::new(
        Database::connect(&config.postgres_url)
            .await
            .context("can't connect to PostgreSQL")?,
    );
    if config.reinit {
        clear_schema(db.pool())
            .await
            .context("can't clear database structure")?;
    }
    init_schema(db.pool())
        .await
        .context("can't init database structure")?;

    let oracle = Arc::new(
        HttpAccrualClient::new(
            &config.accrual.base_url,
            Duration::from_secs(config.accrual.request_timeout_secs),
        )
        .context("can't build accrual client")?,
    );
    let processor = Arc::new(Processor::new(db.clone(), oracle));

    let (dispatcher, rx) = ChannelDispatcher::new(config.scanner.queue_size);
    let worker = DispatchWorker::new(
        rx,
        processor.clone(),
        Duration::from_secs(config.accrual.rate_limit_backoff_secs),
    );
    tokio::spawn(worker.run());

    if config.scanner.enabled {
        let scanner = Scanner::new(
            db.clone(),
            Arc::new(dispatcher),
            Duration::from_secs(config.scanner.tick_secs),
            config.scanner.batch_size,
        );
        tokio::spawn(async move { scanner.run().await });
        info!("Reconciliation scanner enabled");
    } else {
        info!("Reconciliation scanner disabled by config");
    }

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    Ok(())
}
