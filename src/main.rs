//! Gas-sponsorship relay (paymaster).
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /sendTransaction
//!          │
//!          ▼
//!   ┌─────────────┐   ┌─────────────┐   ┌──────────┐   ┌──────────────┐
//!   │  validator  │──▶│   builder   │──▶│  signer  │──▶│ broadcaster  │──▶ {"txHash", "pending"}
//!   └─────────────┘   └──────┬──────┘   └──────────┘   └──────┬───────┘
//!                            │ nonce, gas price, estimate     │ raw tx
//!                            ▼                                ▼
//!                     ┌───────────────────────────────────────────┐
//!                     │        gateway (JSON-RPC endpoint)        │
//!                     └───────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use paymaster_relay::config::load_config;
use paymaster_relay::observability::{logging, metrics};
use paymaster_relay::{HttpServer, Relayer, RpcGateway, Shutdown};

#[derive(Parser)]
#[command(name = "paymaster-relay")]
#[command(about = "Relays calls to one contract, paying gas from a managed account", long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = Arc::new(load_config(&args.config)?);

    logging::init_logging(&config.observability.log_level);
    tracing::info!("paymaster-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        rpc = %config.rpc,
        contract = %config.target_contract,
        chain_id = config.chain_id,
        run_port = %config.run_port,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let gateway = RpcGateway::from_config(&config)?;
    if let Err(e) = gateway.verify_chain_id(config.chain_id).await {
        tracing::warn!(error = %e, "Chain verification failed; continuing");
    }

    let relayer = Arc::new(Relayer::new(&config, Arc::new(gateway))?);
    tracing::info!(relayer = %relayer.address(), "Relayer ready");

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, relayer);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
