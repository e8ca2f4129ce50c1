//! The relay pipeline: validate, build, sign, broadcast.
//!
//! One custodial key means one nonce sequence. The relayer serializes the
//! section from nonce read to broadcast so concurrent requests never sign
//! two transactions with the same nonce.

use alloy::primitives::Address;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::config::RelayConfig;
use crate::gateway::NetworkGateway;
use crate::observability::metrics;
use crate::relay::broadcaster::broadcast;
use crate::relay::builder::TxBuilder;
use crate::relay::signer::TransactionSigner;
use crate::relay::types::{RelayError, RelayReceipt, RelayRequest, RelayResult};
use crate::relay::validator::validate;

/// Sponsors calls to a single allow-listed contract.
pub struct Relayer {
    allowed_target: Address,
    signer: TransactionSigner,
    gateway: Arc<dyn NetworkGateway>,
    /// Nonce following the last successful broadcast. Held across the whole
    /// build-sign-broadcast section. Cleared when the node rejects a nonce.
    next_nonce: Mutex<Option<u64>>,
}

impl Relayer {
    /// Create a relayer from configuration, parsing the custodial key.
    pub fn new(config: &RelayConfig, gateway: Arc<dyn NetworkGateway>) -> RelayResult<Self> {
        let signer = TransactionSigner::from_private_key(&config.private_key, config.chain_id)?;
        Ok(Self::with_signer(config.target_contract, signer, gateway))
    }

    pub fn with_signer(
        allowed_target: Address,
        signer: TransactionSigner,
        gateway: Arc<dyn NetworkGateway>,
    ) -> Self {
        Self {
            allowed_target,
            signer,
            gateway,
            next_nonce: Mutex::new(None),
        }
    }

    /// Relay one request end to end.
    pub async fn relay(&self, request: &RelayRequest) -> RelayResult<RelayReceipt> {
        let start = Instant::now();
        let result = self.run(request).await;

        match &result {
            Ok(receipt) => {
                tracing::info!(
                    tx_hash = %receipt.tx_hash,
                    nonce = receipt.nonce,
                    gas_limit = receipt.gas_limit,
                    gas_price = receipt.gas_price,
                    "Transaction broadcast"
                );
                metrics::record_relay("success", start);
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "Relay failed");
                if let RelayError::Gateway { op, .. } = e {
                    metrics::record_gateway_error(op.as_str());
                }
                metrics::record_relay(e.kind(), start);
            }
        }

        result
    }

    async fn run(&self, request: &RelayRequest) -> RelayResult<RelayReceipt> {
        let data = validate(request, self.allowed_target)?;
        tracing::debug!(contract = %request.target, data_len = data.len(), "Request validated");

        let mut next_nonce = self.next_nonce.lock().await;

        let call = TxBuilder::new(self.gateway.as_ref(), self.signer.address(), self.signer.chain_id())
            .build(request.target, data, *next_nonce)
            .await?;

        let signed = self.signer.sign(&call)?;
        tracing::debug!(tx_hash = %signed.hash(), nonce = call.nonce, "Transaction signed");

        let receipt = match broadcast(self.gateway.as_ref(), &signed).await {
            Ok(receipt) => receipt,
            Err(e) => {
                if e.is_nonce_rejection() && next_nonce.is_some() {
                    tracing::warn!(nonce = call.nonce, "Node refused nonce, resyncing from pending nonce");
                    *next_nonce = None;
                }
                return Err(e);
            }
        };
        // At u64::MAX there is no successor; fall back to the node's view.
        *next_nonce = call.nonce.checked_add(1);

        Ok(receipt)
    }

    /// Address paying for relayed calls.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn allowed_target(&self) -> Address {
        self.allowed_target
    }

    pub fn chain_id(&self) -> u64 {
        self.signer.chain_id()
    }
}

impl std::fmt::Debug for Relayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relayer")
            .field("allowed_target", &self.allowed_target)
            .field("signer", &self.signer)
            .finish()
    }
}
