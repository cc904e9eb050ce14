//! Accrual oracle contract and HTTP client
//!
//! The oracle is the external authority on order status and accrual amount.
//! The wire client is behind a trait so the processor can be exercised
//! against scripted replies.

use crate::error::LedgerError;
use crate::model::OrderStatus;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Status reported by the accrual oracle for one order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccrualStatus {
    Registered,
    Processing,
    Invalid,
    Processed,
}

impl AccrualStatus {
    /// Parse the wire status. Anything outside the known set is an
    /// unexpected-state error; the caller must not mutate anything.
    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "REGISTERED" => Ok(AccrualStatus::Registered),
            "PROCESSING" => Ok(AccrualStatus::Processing),
            "INVALID" => Ok(AccrualStatus::Invalid),
            "PROCESSED" => Ok(AccrualStatus::Processed),
            other => Err(LedgerError::UnexpectedState(other.to_string())),
        }
    }

    /// Lifecycle state an order moves to on this verdict
    pub fn to_order_status(self) -> OrderStatus {
        match self {
            AccrualStatus::Registered => OrderStatus::Registered,
            AccrualStatus::Processing => OrderStatus::Processing,
            AccrualStatus::Invalid => OrderStatus::Invalid,
            AccrualStatus::Processed => OrderStatus::Processed,
        }
    }
}

/// Oracle verdict for one order
#[derive(Debug, Clone)]
pub struct AccrualReply {
    pub order_number: String,
    pub status: AccrualStatus,
    /// Zero unless the status is PROCESSED
    pub accrual: Decimal,
}

/// External accrual oracle contract
#[async_trait]
pub trait AccrualOracle: Send + Sync {
    async fn get_status(&self, order_number: &str) -> Result<AccrualReply, LedgerError>;
}

/// Wire DTO from `GET /api/orders/{number}`
#[derive(Debug, Deserialize)]
struct AccrualWire {
    order: String,
    status: String,
    #[serde(default)]
    accrual: Option<Decimal>,
}

impl AccrualWire {
    fn into_reply(self) -> Result<AccrualReply, LedgerError> {
        Ok(AccrualReply {
            order_number: self.order,
            status: AccrualStatus::parse(&self.status)?,
            accrual: self.accrual.unwrap_or(Decimal::ZERO),
        })
    }
}

/// HTTP client for the accrual oracle
pub struct HttpAccrualClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAccrualClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| LedgerError::RemoteUnavailable(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl AccrualOracle for HttpAccrualClient {
    async fn get_status(&self, order_number: &str) -> Result<AccrualReply, LedgerError> {
        let url = format!("{}/api/orders/{}", self.base_url, order_number);
        debug!(order_number, url, "Querying accrual oracle");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LedgerError::RemoteUnavailable(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let wire: AccrualWire = response
                    .json()
                    .await
                    .map_err(|e| LedgerError::RemoteUnavailable(e.to_string()))?;
                wire.into_reply()
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                warn!(order_number, "Accrual oracle rate limited the request");
                Err(LedgerError::RemoteRateLimited)
            }
            other => {
                warn!(order_number, status = %other, "Unexpected oracle response");
                Err(LedgerError::RemoteUnavailable(format!(
                    "unexpected response status {}",
                    other
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_known_set() {
        assert_eq!(
            AccrualStatus::parse("REGISTERED").unwrap(),
            AccrualStatus::Registered
        );
        assert_eq!(
            AccrualStatus::parse("PROCESSED").unwrap(),
            AccrualStatus::Processed
        );
        assert!(matches!(
            AccrualStatus::parse("HALTED"),
            Err(LedgerError::UnexpectedState(s)) if s == "HALTED"
        ));
    }

    #[test]
    fn test_status_maps_onto_order_lifecycle() {
        assert_eq!(
            AccrualStatus::Registered.to_order_status(),
            OrderStatus::Registered
        );
        assert_eq!(
            AccrualStatus::Processing.to_order_status(),
            OrderStatus::Processing
        );
        assert_eq!(AccrualStatus::Invalid.to_order_status(), OrderStatus::Invalid);
        assert_eq!(
            AccrualStatus::Processed.to_order_status(),
            OrderStatus::Processed
        );
        assert!(AccrualStatus::Invalid.to_order_status().is_terminal());
    }

    #[test]
    fn test_wire_reply_with_accrual() {
        let wire: AccrualWire = serde_json::from_str(
            r#"{"order":"4561261212345467","status":"PROCESSED","accrual":500}"#,
        )
        .unwrap();
        let reply = wire.into_reply().unwrap();
        assert_eq!(reply.order_number, "4561261212345467");
        assert_eq!(reply.status, AccrualStatus::Processed);
        assert_eq!(reply.accrual, Decimal::new(500, 0));
    }

    #[test]
    fn test_wire_reply_without_accrual_defaults_to_zero() {
        let wire: AccrualWire =
            serde_json::from_str(r#"{"order":"8841524506523","status":"PROCESSING"}"#).unwrap();
        let reply = wire.into_reply().unwrap();
        assert_eq!(reply.accrual, Decimal::ZERO);
    }

    #[test]
    fn test_wire_reply_unknown_status_is_error() {
        let wire: AccrualWire =
            serde_json::from_str(r#"{"order":"123","status":"EXPLODED"}"#).unwrap();
        assert!(wire.into_reply().is_err());
    }
}
