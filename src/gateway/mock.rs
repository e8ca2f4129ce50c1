//! In-memory gateway for unit tests.

use alloy::primitives::{keccak256, Address, TxHash};
use async_trait::async_trait;
use std::sync::Mutex;

use crate::gateway::{EstimateRequest, GatewayError, GatewayResult, NetworkGateway};

/// Every call the pipeline made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GatewayCall {
    PendingNonce(Address),
    GasPrice,
    EstimateGas(EstimateRequest),
    SendRaw(Vec<u8>),
}

/// Canned answers plus a call log.
pub(crate) struct MockGateway {
    pub nonce: u64,
    pub nonce_error: Option<GatewayError>,
    pub gas_price: u128,
    pub gas_price_error: Option<GatewayError>,
    pub estimate: Result<u64, GatewayError>,
    pub send_error: Option<GatewayError>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl MockGateway {
    pub fn new(nonce: u64, gas_price: u128, estimate: u64) -> Self {
        Self {
            nonce,
            nonce_error: None,
            gas_price,
            gas_price_error: None,
            estimate: Ok(estimate),
            send_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::SendRaw(raw) => Some(raw),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NetworkGateway for MockGateway {
    async fn pending_nonce(&self, address: Address) -> GatewayResult<u64> {
        self.record(GatewayCall::PendingNonce(address));
        match &self.nonce_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.nonce),
        }
    }

    async fn gas_price(&self) -> GatewayResult<u128> {
        self.record(GatewayCall::GasPrice);
        match &self.gas_price_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.gas_price),
        }
    }

    async fn estimate_gas(&self, request: &EstimateRequest) -> GatewayResult<u64> {
        self.record(GatewayCall::EstimateGas(request.clone()));
        self.estimate.clone()
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> GatewayResult<TxHash> {
        self.record(GatewayCall::SendRaw(raw.to_vec()));
        match &self.send_error {
            Some(e) => Err(e.clone()),
            None => Ok(keccak256(raw)),
        }
    }
}
