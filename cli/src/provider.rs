//! JSON-RPC over HTTP, for talking to a node instead of a browser wallet.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use contract::rpc::{JsonRpcRequest, JsonRpcResponse};
use contract::{Provider, RpcError};
use serde_json::Value;

#[derive(Debug)]
pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into(), next_id: AtomicU64::new(1) }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Provider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest::new(id, method, params);
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Transport(format!("HTTP {} from {}", status.as_u16(), self.url)));
        }
        let envelope: JsonRpcResponse = response.json().await.map_err(|e| RpcError::InvalidResponse {
            method: "json-rpc",
            reason: e.to_string(),
        })?;
        envelope.into_result()
    }

    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
