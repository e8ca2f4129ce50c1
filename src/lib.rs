//! Gas-sponsorship relay ("paymaster") library.
//!
//! Accepts calls addressed to one allow-listed contract and submits them
//! from a single funded account, so callers need no gas of their own.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use gateway::{NetworkGateway, RpcGateway};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::Relayer;
