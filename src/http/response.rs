//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Every pipeline failure maps to 400 with the error text; clients tell
//!   failure kinds apart by message only
//! - Success reports "pending" at submit time; nothing is polled afterwards

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::relay::{RelayError, RelayReceipt, RelayStatus};

/// Body of a successful `POST /sendTransaction`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendTransactionResponse {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
    pub status: RelayStatus,
}

impl From<&RelayReceipt> for SendTransactionResponse {
    fn from(receipt: &RelayReceipt) -> Self {
        Self {
            tx_hash: receipt.tx_hash.to_string(),
            status: receipt.status,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub relayer: String,
    pub target: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
}

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}
