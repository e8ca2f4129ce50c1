//! JSON-RPC gateway backed by alloy HTTP providers.
//!
//! # Responsibilities
//! - Connect to the primary endpoint and any failovers
//! - Answer the four gateway primitives, falling through providers on transport errors
//! - Stop at the first node-level rejection (it would be rejected everywhere)
//! - Optionally bound every call with a timeout

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::{RpcError, TransportErrorKind, TransportResult};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::RelayConfig;
use crate::gateway::{EstimateRequest, GatewayError, GatewayResult, NetworkGateway};

type DynProvider = Arc<dyn Provider + Send + Sync>;

/// Gateway over one or more JSON-RPC endpoints.
#[derive(Clone)]
pub struct RpcGateway {
    /// Primary provider first, then failovers in configured order.
    providers: Vec<DynProvider>,
    endpoints: Vec<String>,
    timeout_secs: Option<u64>,
}

impl RpcGateway {
    /// Build a gateway from the relay configuration.
    ///
    /// The primary URL must parse; unparsable failovers are skipped with a warning.
    pub fn from_config(config: &RelayConfig) -> GatewayResult<Self> {
        let primary = parse_endpoint(&config.rpc)?;
        let mut providers =
            vec![Arc::new(ProviderBuilder::new().connect_http(primary)) as DynProvider];
        let mut endpoints = vec![config.rpc.clone()];

        for url_str in &config.failover_rpcs {
            match parse_endpoint(url_str) {
                Ok(url) => {
                    providers.push(Arc::new(ProviderBuilder::new().connect_http(url)) as DynProvider);
                    endpoints.push(url_str.clone());
                }
                Err(e) => tracing::warn!(error = %e, "Ignoring invalid failover RPC URL"),
            }
        }

        tracing::info!(
            rpc_url = %config.rpc,
            failovers = providers.len() - 1,
            timeout_secs = ?config.rpc_timeout_secs,
            "Network gateway initialized"
        );

        Ok(Self {
            providers,
            endpoints,
            timeout_secs: config.rpc_timeout_secs,
        })
    }

    /// Compare the endpoint's chain ID with the configured one.
    ///
    /// Startup only warns on mismatch so the relay can come up while the node is unreachable.
    pub async fn verify_chain_id(&self, expected: u64) -> GatewayResult<()> {
        let actual = self
            .call("eth_chainId", |p| async move { p.get_chain_id().await })
            .await?;
        if actual != expected {
            return Err(GatewayError::Rpc(format!(
                "chain id mismatch: expected {}, got {}",
                expected, actual
            )));
        }
        Ok(())
    }

    /// Run `f` against each provider in turn until one answers.
    async fn call<T, F, Fut>(&self, method: &'static str, f: F) -> GatewayResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        let mut last_error = GatewayError::Rpc(format!("{}: no providers configured", method));

        for (i, provider) in self.providers.iter().enumerate() {
            let fut = f(provider.clone());
            let outcome = match self.timeout_secs {
                Some(secs) => match timeout(Duration::from_secs(secs), fut).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        tracing::warn!(provider_idx = i, method, "RPC timeout, trying next provider");
                        last_error = GatewayError::Timeout(secs);
                        continue;
                    }
                },
                None => fut.await,
            };

            match outcome {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if let Some(rejection) = rejection_message(&e) {
                        return Err(GatewayError::Rejected(rejection));
                    }
                    tracing::warn!(
                        provider_idx = i,
                        endpoint = %self.endpoints[i],
                        method,
                        error = %e,
                        "RPC error, trying next provider"
                    );
                    last_error = GatewayError::Rpc(e.to_string());
                }
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl NetworkGateway for RpcGateway {
    async fn pending_nonce(&self, address: Address) -> GatewayResult<u64> {
        self.call("eth_getTransactionCount", |p| async move {
            p.get_transaction_count(address).pending().await
        })
        .await
    }

    async fn gas_price(&self) -> GatewayResult<u128> {
        self.call("eth_gasPrice", |p| async move { p.get_gas_price().await })
            .await
    }

    async fn estimate_gas(&self, request: &EstimateRequest) -> GatewayResult<u64> {
        let tx = TransactionRequest::default()
            .with_from(request.from)
            .with_to(request.to)
            .with_value(U256::ZERO)
            .with_input(request.data.clone());

        self.call("eth_estimateGas", |p| {
            let tx = tx.clone();
            async move { p.estimate_gas(tx).await }
        })
        .await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> GatewayResult<TxHash> {
        let raw = raw.to_vec();
        self.call("eth_sendRawTransaction", |p| {
            let raw = raw.clone();
            async move {
                let pending = p.send_raw_transaction(&raw).await?;
                Ok(*pending.tx_hash())
            }
        })
        .await
    }
}

impl std::fmt::Debug for RpcGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcGateway")
            .field("endpoints", &self.endpoints)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn parse_endpoint(raw: &str) -> GatewayResult<url::Url> {
    raw.parse().map_err(|e: url::ParseError| GatewayError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Message of a JSON-RPC error response, if the node itself refused the call.
fn rejection_message(error: &RpcError<TransportErrorKind>) -> Option<String> {
    error.as_error_resp().map(|payload| payload.message.to_string())
}
