//! HTTP client for submitting signed transactions to a STELS node.
//!
//! Wire format of a submission:
//!
//! ```text
//! POST <node_url>
//! stels-session: <token>
//! {"webfix":"1.0","method":"submitAssetTransaction","params":["<network id>"],
//!  "body":{"transaction":{...}}}
//! ```
//!
//! Responses are decoded once, here, into [`NodeResponse`]; nothing past this
//! module looks at raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stels_transactions::AssetTransaction;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::WalletConfig;
use crate::error::NodeError;

pub const WEBFIX_VERSION: &str = "1.0";
pub const SUBMIT_ASSET_TRANSACTION: &str = "submitAssetTransaction";
pub const SESSION_HEADER: &str = "stels-session";

/// Request envelope for node API calls.
#[derive(Debug, Serialize)]
pub struct SubmitEnvelope<'a> {
    pub webfix: &'static str,
    pub method: &'static str,
    pub params: Vec<&'a str>,
    pub body: SubmitBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct SubmitBody<'a> {
    pub transaction: &'a AssetTransaction,
}

impl<'a> SubmitEnvelope<'a> {
    pub fn for_transaction(tx: &'a AssetTransaction) -> Self {
        Self {
            webfix: WEBFIX_VERSION,
            method: SUBMIT_ASSET_TRANSACTION,
            params: vec![tx.network().id.as_str()],
            body: SubmitBody { transaction: tx },
        }
    }
}

/// The `result` object of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub success: bool,
    pub tx_hash: String,
    pub status: String,
    pub pool_key: String,
    pub timestamp: u64,
}

/// A node response body, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeResponse {
    Result(SubmitResult),
    Error(String),
}

impl NodeResponse {
    /// Classify a 2xx response body.
    ///
    /// An `error` member wins over `result`; a body with neither, or with a
    /// `result` that lacks the expected fields, is malformed.
    pub fn decode(body: &str) -> Result<Self, NodeError> {
        let json: Value = serde_json::from_str(body)
            .map_err(|e| NodeError::MalformedResponse(format!("invalid JSON: {e}")))?;

        if let Some(message) = error_message(&json) {
            return Ok(Self::Error(message));
        }
        let result = json
            .get("result")
            .filter(|r| r.is_object())
            .ok_or_else(|| NodeError::MalformedResponse("missing `result` object".into()))?;
        serde_json::from_value(result.clone())
            .map(Self::Result)
            .map_err(|e| NodeError::MalformedResponse(format!("invalid `result`: {e}")))
    }
}

/// Pull a human-readable message out of an error-shaped body.
///
/// Recognises `{"error": "..."}`, `{"error": {"message": "..."}}` and a
/// top-level `{"message": "..."}` next to a non-null `error`.
fn error_message(json: &Value) -> Option<String> {
    let error = json.get("error").filter(|e| !e.is_null())?;
    let message = match error {
        Value::String(s) => s.clone(),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| json.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    };
    Some(message)
}

/// Message for a non-2xx response: body-provided if any, else the reason phrase.
fn http_failure_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            error_message(&json)
                .or_else(|| json.get("message").and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        })
}

/// HTTP client for a STELS node API endpoint.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct NodeClient {
    http: reqwest::Client,
    node_url: String,
}

impl NodeClient {
    /// Create a client for `node_url` with default timeouts.
    pub fn new(node_url: impl Into<String>) -> Result<Self, NodeError> {
        Self::with_timeouts(node_url, Duration::from_secs(30), Duration::from_secs(10))
    }

    pub fn with_timeouts(
        node_url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, NodeError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| NodeError::Client(e.to_string()))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
        })
    }

    pub fn from_config(config: &WalletConfig) -> Result<Self, NodeError> {
        Self::with_timeouts(
            config.node_url.clone(),
            config.request_timeout(),
            config.connect_timeout(),
        )
    }

    /// The configured node URL.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Submit a signed asset transfer.
    ///
    /// Nothing is retried. The transaction is only borrowed, so after any
    /// failure (or if this future is dropped) it can be submitted again as is.
    pub async fn submit_asset_transaction(
        &self,
        tx: &AssetTransaction,
        session: &str,
    ) -> Result<SubmitResult, NodeError> {
        let envelope = SubmitEnvelope::for_transaction(tx);
        debug!(node = %self.node_url, network = %tx.network().id, "submitting asset transfer");

        let response = self
            .http
            .post(&self.node_url)
            .header(SESSION_HEADER, session)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| NodeError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NodeError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let message = http_failure_message(status, &body);
            warn!(status = status.as_u16(), %message, "node returned an error status");
            return Err(NodeError::Http {
                status: status.as_u16(),
                message,
            });
        }

        match NodeResponse::decode(&body)? {
            NodeResponse::Result(result) if result.success => {
                info!(
                    tx_hash = %result.tx_hash,
                    status = %result.status,
                    pool_key = %result.pool_key,
                    "asset transfer accepted"
                );
                Ok(result)
            }
            NodeResponse::Result(result) => {
                warn!(tx_hash = %result.tx_hash, status = %result.status, "node reported failure");
                Err(NodeError::Rejected(format!(
                    "success=false, status {}",
                    result.status
                )))
            }
            NodeResponse::Error(message) => {
                warn!(%message, "node rejected asset transfer");
                Err(NodeError::Rejected(message))
            }
        }
    }
}
