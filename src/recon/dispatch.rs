//! Dispatch seam between the scanner and the processor
//!
//! The scanner never calls the processor in-process; it hands order numbers
//! to a [`DispatchTarget`]. The default target is a bounded channel consumed
//! by a [`DispatchWorker`], which keeps discovery cadence decoupled from
//! processing latency without a network round trip.

use super::processor::Processor;
use crate::error::LedgerError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Best-effort request to trigger processing for one order.
/// A failed dispatch is non-fatal to the caller.
#[async_trait]
pub trait DispatchTarget: Send + Sync {
    async fn enqueue(&self, order_number: &str) -> bool;
}

/// Dispatch over a bounded in-process queue
pub struct ChannelDispatcher {
    tx: mpsc::Sender<String>,
}

impl ChannelDispatcher {
    /// Create the dispatcher and the receiving end for a worker
    pub fn new(queue_size: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(queue_size);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl DispatchTarget for ChannelDispatcher {
    async fn enqueue(&self, order_number: &str) -> bool {
        // A full queue counts as a failed dispatch; the scanner re-discovers
        // the order on its next tick.
        match self.tx.try_send(order_number.to_string()) {
            Ok(()) => true,
            Err(e) => {
                warn!(order_number, error = %e, "Dispatch queue rejected order");
                false
            }
        }
    }
}

/// Consumes dispatched order numbers and drives the processor
pub struct DispatchWorker {
    rx: mpsc::Receiver<String>,
    processor: Arc<Processor>,
    /// Pause after an oracle rate-limit reply before taking the next item
    rate_limit_backoff: Duration,
}

impl DispatchWorker {
    pub fn new(
        rx: mpsc::Receiver<String>,
        processor: Arc<Processor>,
        rate_limit_backoff: Duration,
    ) -> Self {
        Self {
            rx,
            processor,
            rate_limit_backoff,
        }
    }

    /// Run until every sender is dropped
    pub async fn run(mut self) {
        info!(
            backoff_secs = self.rate_limit_backoff.as_secs(),
            "Dispatch worker started"
        );

        while let Some(order_number) = self.rx.recv().await {
            match self.processor.process(&order_number).await {
                Ok(status) => {
                    debug!(order_number, %status, "Order processed");
                }
                Err(LedgerError::RemoteRateLimited) => {
                    warn!(order_number, "Oracle rate limited; backing off");
                    tokio::time::sleep(self.rate_limit_backoff).await;
                }
                Err(e) if e.is_retryable() => {
                    warn!(order_number, error = %e, "Processing failed, will retry on next scan");
                }
                Err(e) => {
                    warn!(order_number, error = %e, "Processing failed");
                }
            }
        }

        info!("Dispatch worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enqueue_and_receive() {
        let (dispatcher, mut rx) = ChannelDispatcher::new(4);

        assert!(dispatcher.enqueue("4561261212345467").await);
        assert_eq!(rx.recv().await.as_deref(), Some("4561261212345467"));
    }

    #[tokio::test]
    async fn test_full_queue_is_failed_dispatch() {
        let (dispatcher, mut rx) = ChannelDispatcher::new(1);

        assert!(dispatcher.enqueue("1").await);
        assert!(!dispatcher.enqueue("2").await, "Full queue must not block");

        // The first dispatch is still intact
        assert_eq!(rx.recv().await.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_closed_channel_is_failed_dispatch() {
        let (dispatcher, rx) = ChannelDispatcher::new(1);
        drop(rx);
        assert!(!dispatcher.enqueue("1").await);
    }
}
