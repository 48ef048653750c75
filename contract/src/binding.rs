//! Typed proxy over the whitelist contract.
//!
//! Reads go through `eth_call` against the latest block; the single write is
//! submitted with `eth_sendTransaction`, leaving signing to the wallet or node
//! that owns the `from` account.

#[cfg(test)]
#[path = "binding_test.rs"]
mod binding_test;

use std::time::Duration;

use alloy_primitives::{Address, B256, Bytes, U64, U256};
use alloy_sol_types::SolCall;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::rpc::{Provider, RpcError, decode_result};
use crate::{CONTRACT_ADDRESS, IWhitelist};

/// Delay between `eth_getTransactionReceipt` polls while a join is pending.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Subset of a transaction receipt this application inspects.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` on revert. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub gas_used: Option<U256>,
}

impl TransactionReceipt {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status.is_none_or(|s| !s.is_zero())
    }
}

/// Contract binding bound to one provider and one address.
#[derive(Debug)]
pub struct WhitelistContract<'a, P> {
    provider: &'a P,
    address: Address,
}

impl<'a, P: Provider> WhitelistContract<'a, P> {
    #[must_use]
    pub fn new(provider: &'a P, address: Address) -> Self {
        Self { provider, address }
    }

    /// Binding for the deployed [`CONTRACT_ADDRESS`].
    #[must_use]
    pub fn deployed(provider: &'a P) -> Self {
        Self::new(provider, CONTRACT_ADDRESS)
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// `whitelistedAddresses(account)`: whether `account` already joined.
    ///
    /// # Errors
    ///
    /// Propagates provider and decoding failures.
    pub async fn is_whitelisted(&self, account: Address) -> Result<bool, RpcError> {
        self.call(&IWhitelist::whitelistedAddressesCall { account }).await
    }

    /// `numAddressesWhitelisted()`: current whitelist size.
    ///
    /// # Errors
    ///
    /// Propagates provider and decoding failures.
    pub async fn num_addresses_whitelisted(&self) -> Result<u64, RpcError> {
        let count = self.call(&IWhitelist::numAddressesWhitelistedCall {}).await?;
        Ok(u64::from(count))
    }

    /// `maxWhitelistedAddresses()`: fixed capacity set at deployment.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::InvalidResponse`] if the value exceeds `u64`.
    pub async fn max_whitelisted_addresses(&self) -> Result<u64, RpcError> {
        let max = self.call(&IWhitelist::maxWhitelistedAddressesCall {}).await?;
        u64::try_from(max).map_err(|_| RpcError::InvalidResponse {
            method: "eth_call",
            reason: format!("maxWhitelistedAddresses out of range: {max}"),
        })
    }

    /// Submit `addAddressToWhitelist()` from `from` and return the transaction hash.
    ///
    /// Resolves once the transaction is broadcast, not when it is mined; use
    /// [`wait_for_receipt`] for confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::UserRejected`] if the signer declines.
    pub async fn add_address_to_whitelist(&self, from: Address) -> Result<B256, RpcError> {
        let data = Bytes::from(IWhitelist::addAddressToWhitelistCall {}.abi_encode());
        let params = json!([{ "from": from, "to": self.address, "data": data }]);
        let raw = self.provider.request("eth_sendTransaction", params).await?;
        decode_result("eth_sendTransaction", raw)
    }

    async fn call<C: SolCall>(&self, call: &C) -> Result<C::Return, RpcError> {
        let data = Bytes::from(call.abi_encode());
        let params = json!([{ "to": self.address, "data": data }, "latest"]);
        let raw = self.provider.request("eth_call", params).await?;
        let output: Bytes = decode_result("eth_call", raw)?;
        Ok(C::abi_decode_returns(&output)?)
    }
}

/// Poll for the receipt of `tx_hash` until it is mined.
///
/// There is no overall deadline; callers that need one wrap this future.
///
/// # Errors
///
/// Returns [`RpcError::Reverted`] if the mined receipt reports failure.
pub async fn wait_for_receipt<P: Provider>(
    provider: &P,
    tx_hash: B256,
    interval: Duration,
) -> Result<TransactionReceipt, RpcError> {
    loop {
        let raw = provider
            .request("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        if raw == Value::Null {
            provider.delay(interval).await;
            continue;
        }
        let receipt: TransactionReceipt = decode_result("eth_getTransactionReceipt", raw)?;
        if !receipt.succeeded() {
            return Err(RpcError::Reverted { tx_hash });
        }
        return Ok(receipt);
    }
}
