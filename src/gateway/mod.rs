//! Network gateway subsystem.
//!
//! # Data Flow
//! ```text
//! Relayer
//!     → NetworkGateway (narrow capability: nonce, gas price, estimate, send)
//!     → rpc.rs (alloy HTTP providers, primary + failovers)
//!     → JSON-RPC endpoint
//! ```
//!
//! The pipeline only ever sees the trait, so tests substitute an in-memory
//! implementation and never touch a real network.

use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;
use thiserror::Error;

pub mod rpc;

#[cfg(test)]
pub(crate) mod mock;

pub use rpc::RpcGateway;

/// Errors surfaced by a gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Transport failure or unusable response.
    #[error("{0}")]
    Rpc(String),

    /// The node answered with a JSON-RPC error (revert, nonce too low, underpriced...).
    #[error("{0}")]
    Rejected(String),

    /// Call did not complete within the configured timeout.
    #[error("rpc timeout after {0} seconds")]
    Timeout(u64),

    /// Endpoint URL could not be parsed.
    #[error("invalid rpc url '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A call to be simulated by `eth_estimateGas`. Value is always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

/// The four chain primitives the relay needs.
#[async_trait]
pub trait NetworkGateway: Send + Sync {
    /// Nonce of `address` including not-yet-mined transactions.
    async fn pending_nonce(&self, address: Address) -> GatewayResult<u64>;

    /// Network-suggested gas price in wei.
    async fn gas_price(&self) -> GatewayResult<u128>;

    /// Simulated gas usage of `request`.
    async fn estimate_gas(&self, request: &EstimateRequest) -> GatewayResult<u64>;

    /// Submit an EIP-2718 encoded signed transaction.
    async fn send_raw_transaction(&self, raw: &[u8]) -> GatewayResult<TxHash>;
}
