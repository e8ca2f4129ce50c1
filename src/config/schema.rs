//! Configuration schema definitions.
//!
//! Mirrors the YAML file the relay is started with. All types derive Serde
//! traits; optional sections fall back to their `Default` impls.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// JSON-RPC endpoint URL.
    #[serde(default)]
    pub rpc: String,

    /// Failover JSON-RPC endpoint URLs, tried in order on transport errors.
    #[serde(default)]
    pub failover_rpcs: Vec<String>,

    /// Hex-encoded custodial private key (with or without 0x prefix).
    #[serde(default)]
    pub private_key: String,

    /// The only contract the relay will submit calls to.
    pub target_contract: Address,

    /// Chain ID used for EIP-155 signing.
    #[serde(rename = "chainId", default)]
    pub chain_id: u64,

    /// Listen port, either ":8080", "8080" or a full "host:port" (hostnames allowed).
    #[serde(default = "default_run_port")]
    pub run_port: String,

    /// Per-call RPC timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub rpc_timeout_secs: Option<u64>,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Observability settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_run_port() -> String {
    ":8080".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl RelayConfig {
    /// Minimal configuration for the given endpoint, key and target.
    pub fn new(
        rpc: impl Into<String>,
        private_key: impl Into<String>,
        target_contract: Address,
        chain_id: u64,
    ) -> Self {
        Self {
            rpc: rpc.into(),
            failover_rpcs: Vec::new(),
            private_key: private_key.into(),
            target_contract,
            chain_id,
            run_port: default_run_port(),
            rpc_timeout_secs: None,
            max_body_bytes: default_max_body_bytes(),
            observability: ObservabilityConfig::default(),
        }
    }

    /// Resolve `run_port` into a bindable address.
    ///
    /// A bare port (with or without a leading colon) binds on all interfaces.
    pub fn bind_address(&self) -> String {
        let port = self.run_port.trim();
        if let Some(rest) = port.strip_prefix(':') {
            format!("0.0.0.0:{}", rest)
        } else if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) {
            format!("0.0.0.0:{}", port)
        } else {
            port.to_string()
        }
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("rpc", &self.rpc)
            .field("failover_rpcs", &self.failover_rpcs)
            .field("private_key", &"<redacted>")
            .field("target_contract", &self.target_contract)
            .field("chain_id", &self.chain_id)
            .field("run_port", &self.run_port)
            .field("rpc_timeout_secs", &self.rpc_timeout_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("observability", &self.observability)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
