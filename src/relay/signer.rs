//! Custodial key handling and transaction signing.
//!
//! # Security
//! - The key is parsed once at startup from configuration
//! - Keys are never logged or serialized
//! - Signatures are EIP-155 bound to the configured chain ID

use alloy::consensus::SignableTransaction;
use alloy::network::TxSignerSync;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::relay::types::{RelayError, RelayResult, SignedTransaction, UnsignedCall};

/// Signs relay transactions with the custodial key.
#[derive(Clone)]
pub struct TransactionSigner {
    /// secp256k1 key, chain-bound.
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl TransactionSigner {
    /// Create a signer from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> RelayResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| RelayError::Key(format!("invalid private key: {}", e)))?;
        let signer = signer.with_chain_id(Some(chain_id));

        tracing::info!(
            address = %signer.address(),
            chain_id,
            "Relay signer initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Address derived from the custodial key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Sign `call` as an EIP-155 legacy transaction.
    ///
    /// Fails if the call was built for a different chain than this signer's.
    pub fn sign(&self, call: &UnsignedCall) -> RelayResult<SignedTransaction> {
        if call.chain_id != self.chain_id {
            return Err(RelayError::Signing(format!(
                "call targets chain {} but signer is bound to chain {}",
                call.chain_id, self.chain_id
            )));
        }

        let mut tx = call.to_legacy();
        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| RelayError::Signing(e.to_string()))?;

        Ok(SignedTransaction::new(tx.into_signed(signature)))
    }
}

impl std::fmt::Debug for TransactionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionSigner")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
