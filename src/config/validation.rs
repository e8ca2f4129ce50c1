//! Configuration validation.
//!
//! Serde handles the syntactic side; this module checks values. Validation
//! is a pure function that reports every problem it finds, not just the first.

use std::net::{SocketAddr, ToSocketAddrs};

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Offending key.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if config.rpc.trim().is_empty() {
        issues.push(ValidationIssue::new("rpc", "missing rpc"));
    } else if let Err(e) = check_rpc_url(&config.rpc) {
        issues.push(ValidationIssue::new("rpc", e));
    }

    for url in &config.failover_rpcs {
        if let Err(e) = check_rpc_url(url) {
            issues.push(ValidationIssue::new("failover_rpcs", e));
        }
    }

    if config.private_key.trim().is_empty() {
        issues.push(ValidationIssue::new("private_key", "missing private key"));
    }

    if config.chain_id == 0 {
        issues.push(ValidationIssue::new("chainId", "chain id must be non-zero"));
    }

    if !resolves(&config.bind_address()) {
        issues.push(ValidationIssue::new(
            "run_port",
            format!("'{}' does not resolve to a socket address", config.run_port),
        ));
    }

    if config.rpc_timeout_secs == Some(0) {
        issues.push(ValidationIssue::new(
            "rpc_timeout_secs",
            "timeout must be greater than zero",
        ));
    }

    if config.max_body_bytes == 0 {
        issues.push(ValidationIssue::new(
            "max_body_bytes",
            "body limit must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        issues.push(ValidationIssue::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Whether `addr` is an IP socket address or a resolvable `host:port`.
fn resolves(addr: &str) -> bool {
    addr.to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}

fn check_rpc_url(raw: &str) -> Result<(), String> {
    let url = url::Url::parse(raw).map_err(|e| format!("invalid url '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}' in '{}'", other, raw)),
    }
}
