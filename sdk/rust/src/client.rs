use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SendTransactionRequest {
    pub target: String,
    #[serde(rename = "callData")]
    pub call_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendTransactionResponse {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub relayer: String,
    pub target: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
}

pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a sponsored call. A 400 comes back as an error carrying the relay's message.
    pub async fn send_transaction(
        &self,
        target: &str,
        call_data: &str,
    ) -> Result<SendTransactionResponse, Box<dyn std::error::Error>> {
        let resp = self.post_send_transaction(target, call_data).await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(format!("relay returned error status {}: {}", status, message).into());
        }

        Ok(serde_json::from_str::<SendTransactionResponse>(&text)?)
    }

    /// Raw `POST /sendTransaction`, leaving status handling to the caller.
    pub async fn post_send_transaction(
        &self,
        target: &str,
        call_data: &str,
    ) -> Result<Response, reqwest::Error> {
        self.client
            .post(format!("{}/sendTransaction", self.relay_url))
            .json(&SendTransactionRequest {
                target: target.to_string(),
                call_data: call_data.to_string(),
            })
            .send()
            .await
    }

    pub async fn health(&self) -> Result<HealthResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/health", self.relay_url))
            .send()
            .await?;
        Ok(resp.error_for_status()?.json().await?)
    }
}
