//! Pipeline data types and error definitions.

use alloy::consensus::{SignableTransaction, Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, Signature, TxHash, TxKind, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gateway::GatewayError;

/// Inbound relay request as posted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    /// Contract the call is addressed to; must be the allow-listed target.
    pub target: Address,
    /// Call payload, `0x`-prefixed hex or a raw string.
    pub call_data: String,
}

/// A fully parameterised call, ready to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedCall {
    pub nonce: u64,
    pub to: Address,
    /// Always zero; the relay never forwards native value.
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub data: Bytes,
    pub chain_id: u64,
}

impl UnsignedCall {
    /// The EIP-155 legacy transaction this call signs as.
    pub fn to_legacy(&self) -> TxLegacy {
        TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: self.data.clone(),
        }
    }
}

/// A chain-bound signed legacy transaction.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    inner: Signed<TxLegacy>,
}

impl SignedTransaction {
    pub(crate) fn new(inner: Signed<TxLegacy>) -> Self {
        Self { inner }
    }

    /// Canonical transaction identifier.
    pub fn hash(&self) -> TxHash {
        *self.inner.hash()
    }

    pub fn tx(&self) -> &TxLegacy {
        self.inner.tx()
    }

    pub fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    /// Raw EIP-2718 bytes as submitted to `eth_sendRawTransaction`.
    pub fn encoded(&self) -> Vec<u8> {
        TxEnvelope::Legacy(self.inner.clone()).encoded_2718()
    }

    /// Address that produced the signature.
    pub fn recover_signer(&self) -> RelayResult<Address> {
        self.signature()
            .recover_address_from_prehash(&self.tx().signature_hash())
            .map_err(|e| RelayError::Signing(format!("signer recovery failed: {}", e)))
    }

    /// Whether the signature verifies as `signer`'s if replayed on `chain_id`.
    pub fn verifies_on_chain(&self, chain_id: u64, signer: Address) -> bool {
        let mut replayed = self.tx().clone();
        replayed.chain_id = Some(chain_id);
        self.signature()
            .recover_address_from_prehash(&replayed.signature_hash())
            .map(|recovered| recovered == signer)
            .unwrap_or(false)
    }
}

/// Outcome reported to the caller after broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayStatus {
    /// Accepted by the node; inclusion is not tracked.
    Pending,
}

impl RelayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayStatus::Pending => "pending",
        }
    }
}

/// Result of a successful relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    pub tx_hash: TxHash,
    pub status: RelayStatus,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
}

/// Gateway read that failed while building a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOp {
    PendingNonce,
    GasPrice,
    EstimateGas,
}

impl GatewayOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayOp::PendingNonce => "pending_nonce",
            GatewayOp::GasPrice => "gas_price",
            GatewayOp::EstimateGas => "estimate_gas",
        }
    }
}

impl std::fmt::Display for GatewayOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            GatewayOp::PendingNonce => "get account nonce",
            GatewayOp::GasPrice => "get gas price",
            GatewayOp::EstimateGas => "estimate gas",
        };
        f.write_str(action)
    }
}

/// Errors that abort the relay pipeline.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Disallowed target or undecodable payload.
    #[error("{0}")]
    Validation(String),

    /// A gateway read failed while building the call.
    #[error("failed to {op}: {source}")]
    Gateway {
        op: GatewayOp,
        #[source]
        source: GatewayError,
    },

    /// The custodial key is malformed.
    #[error("failed to unlock account: {0}")]
    Key(String),

    /// Signature construction failed.
    #[error("failed to sign transaction: {0}")]
    Signing(String),

    /// The network refused the signed transaction.
    #[error("failed to send transaction: {0}")]
    Broadcast(#[source] GatewayError),
}

impl RelayError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation",
            RelayError::Gateway { .. } => "gateway",
            RelayError::Key(_) => "key",
            RelayError::Signing(_) => "signing",
            RelayError::Broadcast(_) => "broadcast",
        }
    }

    /// Whether the node refused the broadcast over its nonce.
    pub fn is_nonce_rejection(&self) -> bool {
        matches!(
            self,
            RelayError::Broadcast(GatewayError::Rejected(message))
                if message.to_ascii_lowercase().contains("nonce")
        )
    }
}

/// Result type for pipeline stages.
pub type RelayResult<T> = Result<T, RelayError>;
