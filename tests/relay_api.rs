//! End-to-end tests of the relay over real HTTP.

use alloy::consensus::{SignableTransaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{keccak256, Address, TxKind, U256};
use relay_sdk::RelayClient;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{start_relay, target, ScriptedGateway};

fn target_hex() -> String {
    target().to_string()
}

#[tokio::test]
async fn test_sponsored_call_is_built_signed_and_sent() {
    let gateway = Arc::new(ScriptedGateway::new(7, 10, 50_000));
    let (addr, shutdown) = start_relay(gateway.clone()).await;
    let client = RelayClient::new(&format!("http://{}", addr));

    let resp = client
        .send_transaction(&target_hex(), "0xa9059cbb")
        .await
        .unwrap();
    assert_eq!(resp.status, "pending");

    assert_eq!(
        gateway.calls(),
        vec![
            "eth_getTransactionCount",
            "eth_gasPrice",
            "eth_estimateGas",
            "eth_sendRawTransaction",
        ]
    );

    let sent = gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(resp.tx_hash, keccak256(&sent[0]).to_string());

    let envelope = TxEnvelope::decode_2718(&mut sent[0].as_slice()).unwrap();
    let signed = envelope.as_legacy().unwrap();
    let tx = signed.tx();
    assert_eq!(tx.nonce, 7);
    assert_eq!(tx.gas_price, 10);
    assert_eq!(tx.gas_limit, 60_000);
    assert_eq!(tx.value, U256::ZERO);
    assert_eq!(tx.chain_id, Some(1));
    assert_eq!(tx.to, TxKind::Call(target()));
    assert_eq!(tx.input.as_ref(), &[0xa9, 0x05, 0x9c, 0xbb]);
    assert_eq!(
        signed
            .signature()
            .recover_address_from_prehash(&tx.signature_hash())
            .unwrap()
            .to_string()
            .to_lowercase(),
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_other_contract_is_rejected_without_touching_network() {
    let gateway = Arc::new(ScriptedGateway::new(7, 10, 50_000));
    let (addr, shutdown) = start_relay(gateway.clone()).await;
    let client = RelayClient::new(&format!("http://{}", addr));

    let other = Address::repeat_byte(0xbb).to_string();
    let resp = client.post_send_transaction(&other, "0x1234").await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "target is not the allowed contract address");
    assert!(gateway.calls().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_revert_during_estimation_is_reported() {
    let mut scripted = ScriptedGateway::new(7, 10, 0);
    scripted.estimate_error = Some("execution reverted".into());
    let gateway = Arc::new(scripted);
    let (addr, shutdown) = start_relay(gateway.clone()).await;
    let client = RelayClient::new(&format!("http://{}", addr));

    let resp = client
        .post_send_transaction(&target_hex(), "0x1234")
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("failed to estimate gas"), "{}", error);
    assert!(error.contains("execution reverted"));
    assert!(!gateway.calls().contains(&"eth_sendRawTransaction"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_rejected_broadcast_is_reported() {
    let mut scripted = ScriptedGateway::new(7, 10, 21_000);
    scripted.send_error = Some("insufficient funds for gas * price + value".into());
    let gateway = Arc::new(scripted);
    let (addr, shutdown) = start_relay(gateway.clone()).await;
    let client = RelayClient::new(&format!("http://{}", addr));

    let err = client
        .send_transaction(&target_hex(), "0x1234")
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("400"), "{}", message);
    assert!(message.contains("failed to send transaction"), "{}", message);

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests_never_share_a_nonce() {
    let mut scripted = ScriptedGateway::new(3, 10, 21_000);
    scripted.send_delay = Some(Duration::from_millis(20));
    let gateway = Arc::new(scripted);
    let (addr, shutdown) = start_relay(gateway.clone()).await;
    let url = format!("http://{}", addr);

    let mut handles = Vec::new();
    for i in 0..5u8 {
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            RelayClient::new(&url)
                .send_transaction(&target_hex(), &format!("0x{:02x}", i))
                .await
                .map(|r| r.status)
                .map_err(|e| e.to_string())
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "pending");
    }

    let mut nonces: Vec<u64> = gateway
        .sent()
        .iter()
        .map(|raw| {
            let envelope = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
            envelope.as_legacy().unwrap().tx().nonce
        })
        .collect();
    nonces.sort_unstable();
    assert_eq!(nonces, vec![3, 4, 5, 6, 7]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_cors_preflight_from_any_origin() {
    let gateway = Arc::new(ScriptedGateway::new(0, 0, 0));
    let (addr, shutdown) = start_relay(gateway).await;

    let resp = reqwest::Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}/sendTransaction", addr),
        )
        .header("Origin", "https://wallet.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "https://wallet.example"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_reports_relayer_identity() {
    let gateway = Arc::new(ScriptedGateway::new(0, 0, 0));
    let (addr, shutdown) = start_relay(gateway).await;

    let health = RelayClient::new(&format!("http://{}", addr))
        .health()
        .await
        .unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.chain_id, 1);
    assert_eq!(health.target.to_lowercase(), target_hex().to_lowercase());

    shutdown.trigger();
}
