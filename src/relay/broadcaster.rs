//! Broadcast of signed transactions.

use crate::gateway::NetworkGateway;
use crate::relay::types::{RelayError, RelayReceipt, RelayResult, RelayStatus, SignedTransaction};

/// Submit `tx` and report it as pending.
///
/// "Pending" only means the node accepted the submission; inclusion is not
/// tracked. The locally computed hash is authoritative.
pub async fn broadcast(
    gateway: &dyn NetworkGateway,
    tx: &SignedTransaction,
) -> RelayResult<RelayReceipt> {
    let local_hash = tx.hash();

    let node_hash = gateway
        .send_raw_transaction(&tx.encoded())
        .await
        .map_err(RelayError::Broadcast)?;

    if node_hash != local_hash {
        tracing::warn!(
            tx_hash = %local_hash,
            node_hash = %node_hash,
            "Node reported a different transaction hash"
        );
    }

    let unsigned = tx.tx();
    Ok(RelayReceipt {
        tx_hash: local_hash,
        status: RelayStatus::Pending,
        nonce: unsigned.nonce,
        gas_limit: unsigned.gas_limit,
        gas_price: unsigned.gas_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::MockGateway;
    use crate::gateway::GatewayError;
    use crate::relay::signer::TransactionSigner;
    use crate::relay::types::UnsignedCall;
    use alloy::primitives::{Address, Bytes, U256};

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn signed() -> SignedTransaction {
        let signer = TransactionSigner::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();
        signer
            .sign(&UnsignedCall {
                nonce: 2,
                to: Address::repeat_byte(0xaa),
                value: U256::ZERO,
                gas_limit: 25_200,
                gas_price: 1_000_000_000,
                data: Bytes::new(),
                chain_id: 1,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_broadcast_sends_encoded_bytes() {
        let gateway = MockGateway::new(0, 0, 0);
        let tx = signed();

        let receipt = broadcast(&gateway, &tx).await.unwrap();

        assert_eq!(receipt.tx_hash, tx.hash());
        assert_eq!(receipt.status, RelayStatus::Pending);
        assert_eq!(receipt.nonce, 2);
        assert_eq!(gateway.sent(), vec![tx.encoded()]);
    }

    #[tokio::test]
    async fn test_rejection_is_broadcast_error() {
        let mut gateway = MockGateway::new(0, 0, 0);
        gateway.send_error = Some(GatewayError::Rejected("insufficient funds for gas * price + value".into()));

        let err = broadcast(&gateway, &signed()).await.unwrap_err();
        assert!(matches!(err, RelayError::Broadcast(_)));
        assert!(err.to_string().contains("insufficient funds"));
    }
}
