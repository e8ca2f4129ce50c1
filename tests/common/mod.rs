//! Shared utilities for integration testing.

use alloy::primitives::{keccak256, Address, TxHash};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use paymaster_relay::gateway::{EstimateRequest, GatewayError, GatewayResult};
use paymaster_relay::{HttpServer, NetworkGateway, RelayConfig, Relayer, Shutdown};

/// Well-known development key; its address is 0xf39F...2266.
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub fn target() -> Address {
    Address::repeat_byte(0xaa)
}

/// A gateway with programmable answers that records what it was asked.
#[derive(Default)]
pub struct ScriptedGateway {
    pub nonce: u64,
    pub gas_price: u128,
    pub estimate: u64,
    pub estimate_error: Option<String>,
    pub send_error: Option<String>,
    /// Delay inside `send_raw_transaction`, to widen race windows.
    pub send_delay: Option<Duration>,
    calls: Mutex<Vec<&'static str>>,
    sent: Mutex<Vec<Vec<u8>>>,
}

#[allow(dead_code)]
impl ScriptedGateway {
    pub fn new(nonce: u64, gas_price: u128, estimate: u64) -> Self {
        Self {
            nonce,
            gas_price,
            estimate,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NetworkGateway for ScriptedGateway {
    async fn pending_nonce(&self, _address: Address) -> GatewayResult<u64> {
        self.record("eth_getTransactionCount");
        Ok(self.nonce)
    }

    async fn gas_price(&self) -> GatewayResult<u128> {
        self.record("eth_gasPrice");
        Ok(self.gas_price)
    }

    async fn estimate_gas(&self, _request: &EstimateRequest) -> GatewayResult<u64> {
        self.record("eth_estimateGas");
        match &self.estimate_error {
            Some(msg) => Err(GatewayError::Rejected(msg.clone())),
            None => Ok(self.estimate),
        }
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> GatewayResult<TxHash> {
        self.record("eth_sendRawTransaction");
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(msg) = &self.send_error {
            return Err(GatewayError::Rejected(msg.clone()));
        }
        self.sent.lock().unwrap().push(raw.to_vec());
        Ok(keccak256(raw))
    }
}

/// Start a relay on an ephemeral port backed by `gateway`.
pub async fn start_relay(gateway: Arc<ScriptedGateway>) -> (SocketAddr, Shutdown) {
    let config = Arc::new(RelayConfig::new(
        "http://localhost:8545",
        TEST_PRIVATE_KEY,
        target(),
        1,
    ));
    let relayer = Arc::new(Relayer::new(&config, gateway).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, relayer);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });

    (addr, shutdown)
}
