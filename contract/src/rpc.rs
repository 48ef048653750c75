//! JSON-RPC provider abstraction and the account/network queries built on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to an injected EIP-1193 wallet and the CLI talks to a
//! node over HTTP. Both reduce to `request(method, params) -> result`, so the
//! contract binding and the view-controller are generic over [`Provider`].
//!
//! ERROR HANDLING
//! ==============
//! Every failure is an [`RpcError`]. Wallet error objects are classified by
//! their EIP-1193 code so callers can tell a user rejection from a revert or a
//! dropped connection without string matching.

#[cfg(test)]
#[path = "rpc_test.rs"]
mod rpc_test;

use std::time::Duration;

use alloy_primitives::{Address, B256, U64};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// EIP-1193 code for "the user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Failure of a provider request or of decoding its result.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// No wallet or node is reachable (e.g. no injected provider in the page).
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    /// The user declined the wallet prompt.
    #[error("request rejected by user")]
    UserRejected,
    /// The provider returned a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response did not have the expected shape.
    #[error("invalid response to {method}: {reason}")]
    InvalidResponse { method: &'static str, reason: String },
    /// Calldata or return data could not be ABI-decoded.
    #[error("abi decode failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),
    /// The transaction was mined but its receipt reports failure.
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: B256 },
}

impl RpcError {
    /// Classify a JSON-RPC / EIP-1193 error object.
    #[must_use]
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            Self::UserRejected
        } else {
            Self::Rpc { code, message: message.into() }
        }
    }
}

/// Error member of a JSON-RPC response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl From<JsonRpcErrorObject> for RpcError {
    fn from(obj: JsonRpcErrorObject) -> Self {
        Self::from_code(obj.code, obj.message)
    }
}

/// JSON-RPC 2.0 request envelope.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> JsonRpcRequest<'a> {
    #[must_use]
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self { jsonrpc: "2.0", id, method, params }
    }
}

/// JSON-RPC 2.0 response envelope.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    /// Split the envelope into its result or its error.
    ///
    /// A response with neither member is treated as a `null` result, which is
    /// how nodes answer e.g. `eth_getTransactionReceipt` for a pending hash.
    ///
    /// # Errors
    ///
    /// Returns the classified error object when present.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match (self.result, self.error) {
            (_, Some(err)) => Err(err.into()),
            (Some(value), None) => Ok(value),
            (None, None) => Ok(Value::Null),
        }
    }
}

/// An EIP-1193 style request channel to a wallet or node.
///
/// Implementations are single-threaded; futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait Provider {
    /// Issue one JSON-RPC request and return its `result` member.
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;

    /// Suspend for `duration` on the provider's runtime (browser timer, tokio, ...).
    async fn delay(&self, duration: Duration);
}

/// Deserialize a result value, attributing failures to `method`.
///
/// # Errors
///
/// Returns [`RpcError::InvalidResponse`] if `value` does not match `T`.
pub fn decode_result<T: DeserializeOwned>(method: &'static str, value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::InvalidResponse { method, reason: e.to_string() })
}

/// Read the active network's chain ID (`eth_chainId`).
///
/// # Errors
///
/// Propagates provider failures and malformed quantities.
pub async fn chain_id<P: Provider>(provider: &P) -> Result<u64, RpcError> {
    let raw = provider.request("eth_chainId", Value::Array(Vec::new())).await?;
    let id: U64 = decode_result("eth_chainId", raw)?;
    Ok(id.to::<u64>())
}

/// List accounts already authorized for this origin (`eth_accounts`).
///
/// Never prompts the user; returns an empty list when not yet connected.
///
/// # Errors
///
/// Propagates provider failures and malformed addresses.
pub async fn accounts<P: Provider>(provider: &P) -> Result<Vec<Address>, RpcError> {
    let raw = provider.request("eth_accounts", Value::Array(Vec::new())).await?;
    decode_result("eth_accounts", raw)
}

/// Ask the wallet to authorize this origin (`eth_requestAccounts`).
///
/// # Errors
///
/// Returns [`RpcError::UserRejected`] if the user dismisses the prompt.
pub async fn request_accounts<P: Provider>(provider: &P) -> Result<Vec<Address>, RpcError> {
    let raw = provider.request("eth_requestAccounts", Value::Array(Vec::new())).await?;
    decode_result("eth_requestAccounts", raw)
}
