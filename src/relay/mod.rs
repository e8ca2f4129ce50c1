//! Transaction relay subsystem.
//!
//! # Data Flow
//! ```text
//! RelayRequest
//!     → validator.rs (allow-listed target, decode call data)
//!     → builder.rs (pending nonce, gas price, estimate * 120%)
//!     → signer.rs (EIP-155 legacy signature, custodial key)
//!     → broadcaster.rs (eth_sendRawTransaction, report "pending")
//!     → RelayReceipt
//! ```
//!
//! # Security Constraints
//! - Only the configured target contract is ever called
//! - Transactions never carry native value
//! - The custodial key is never logged
//!
//! Any stage failing aborts the pipeline. Nothing is persisted before a
//! successful broadcast, so there is nothing to roll back.

pub mod broadcaster;
pub mod builder;
pub mod pipeline;
pub mod signer;
pub mod types;
pub mod validator;

pub use builder::{apply_gas_margin, TxBuilder, GAS_LIMIT_MARGIN_PERCENT};
pub use pipeline::Relayer;
pub use signer::TransactionSigner;
pub use types::{
    GatewayOp, RelayError, RelayReceipt, RelayRequest, RelayResult, RelayStatus,
    SignedTransaction, UnsignedCall,
};
pub use validator::{decode_call_data, validate};
