//! Transaction building: nonce, gas price and gas limit derivation.
//!
//! # Responsibilities
//! - Read the pending nonce, gas price and gas estimate from the gateway
//! - Apply the gas limit safety margin
//! - Never let the nonce fall behind what this relay has already sent

use alloy::primitives::{Address, Bytes, U256};

use crate::gateway::{EstimateRequest, NetworkGateway};
use crate::relay::types::{GatewayOp, RelayError, RelayResult, UnsignedCall};

/// Gas limit as a percentage of the simulated gas usage.
pub const GAS_LIMIT_MARGIN_PERCENT: u64 = 120;

/// Scale a gas estimate by the safety margin, rounding down.
///
/// Saturates at `u64::MAX` instead of overflowing.
pub fn apply_gas_margin(estimate: u64) -> u64 {
    let scaled = estimate as u128 * GAS_LIMIT_MARGIN_PERCENT as u128 / 100;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Builds unsigned calls against a gateway.
pub struct TxBuilder<'a> {
    gateway: &'a dyn NetworkGateway,
    from: Address,
    chain_id: u64,
}

impl<'a> TxBuilder<'a> {
    /// Create a builder for calls sent from `from` on `chain_id`.
    pub fn new(gateway: &'a dyn NetworkGateway, from: Address, chain_id: u64) -> Self {
        Self {
            gateway,
            from,
            chain_id,
        }
    }

    /// Build a zero-value call to `to` carrying `data`.
    ///
    /// # Arguments
    /// * `to` - Destination contract
    /// * `data` - Decoded call data
    /// * `next_local_nonce` - Nonce following the last transaction this relay broadcast, if any
    pub async fn build(
        &self,
        to: Address,
        data: Bytes,
        next_local_nonce: Option<u64>,
    ) -> RelayResult<UnsignedCall> {
        let pending_nonce = self
            .gateway
            .pending_nonce(self.from)
            .await
            .map_err(|source| RelayError::Gateway {
                op: GatewayOp::PendingNonce,
                source,
            })?;

        // The local slot only ever moves the nonce up. A broadcast that the
        // node later drops from its pool leaves a gap that later relays sit
        // behind until the node rejects one over its nonce and the relayer
        // resets the slot.
        let nonce = match next_local_nonce {
            Some(local) if local > pending_nonce => {
                tracing::debug!(
                    pending_nonce,
                    local_nonce = local,
                    "Node pending nonce lags behind local sequence"
                );
                local
            }
            _ => pending_nonce,
        };

        let gas_price = self
            .gateway
            .gas_price()
            .await
            .map_err(|source| RelayError::Gateway {
                op: GatewayOp::GasPrice,
                source,
            })?;

        let estimate = self
            .gateway
            .estimate_gas(&EstimateRequest {
                from: self.from,
                to,
                data: data.clone(),
            })
            .await
            .map_err(|source| RelayError::Gateway {
                op: GatewayOp::EstimateGas,
                source,
            })?;

        let gas_limit = apply_gas_margin(estimate);

        tracing::debug!(
            nonce,
            gas_price,
            estimate,
            gas_limit,
            "Call parameters derived"
        );

        Ok(UnsignedCall {
            nonce,
            to,
            value: U256::ZERO,
            gas_limit,
            gas_price,
            data,
            chain_id: self.chain_id,
        })
    }
}
