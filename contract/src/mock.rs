//! Scripted in-memory chain for exercising providers without a wallet.
//!
//! Interprets the handful of JSON-RPC methods this application issues and
//! keeps a method log so tests can assert on call order.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use alloy_sol_types::{SolCall, SolValue};
use serde_json::{Value, json};

use crate::rpc::{Provider, RpcError, decode_result};
use crate::{CONTRACT_ADDRESS, IWhitelist, REQUIRED_CHAIN_ID};

/// How the next submitted transaction resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TxOutcome {
    #[default]
    Mined,
    Reverted,
    /// The signer declines before broadcast.
    Rejected,
}

#[derive(Clone, Debug)]
struct PendingTx {
    hash: B256,
    from: Address,
    polls_left: u32,
}

/// Script behind a [`MockProvider`]: what the wallet and contract report.
#[derive(Clone, Debug)]
pub struct MockChain {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    pub authorized: bool,
    pub reject_connect: bool,
    pub whitelisted: BTreeSet<Address>,
    pub capacity: u64,
    pub tx_outcome: TxOutcome,
    /// Receipt polls that answer `null` before the transaction is mined.
    pub pending_polls: u32,
    /// Methods that fail with a JSON-RPC error instead of answering.
    pub failing: BTreeMap<String, (i64, String)>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            chain_id: REQUIRED_CHAIN_ID,
            accounts: vec![Self::default_account()],
            authorized: false,
            reject_connect: false,
            whitelisted: BTreeSet::new(),
            capacity: 100,
            tx_outcome: TxOutcome::Mined,
            pending_polls: 0,
            failing: BTreeMap::new(),
        }
    }
}

impl MockChain {
    /// The account the mock wallet exposes unless overridden.
    #[must_use]
    pub fn default_account() -> Address {
        Address::repeat_byte(0xaa)
    }

    /// Seed `count` unrelated whitelisted addresses.
    #[must_use]
    pub fn with_members(mut self, count: u8) -> Self {
        for i in 1..=count {
            self.whitelisted.insert(Address::with_last_byte(i));
        }
        self
    }

    /// Make `method` answer with a JSON-RPC error.
    #[must_use]
    pub fn failing(mut self, method: &str, code: i64, message: &str) -> Self {
        self.failing.insert(method.to_owned(), (code, message.to_owned()));
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    chain: MockChain,
    pending: Option<PendingTx>,
    nonce: u64,
    log: Vec<String>,
    delays: Vec<Duration>,
}

impl MockState {
    fn handle(&mut self, method: &str, params: &Value) -> Result<Value, RpcError> {
        self.log.push(method.to_owned());
        if let Some((code, message)) = self.chain.failing.get(method) {
            return Err(RpcError::from_code(*code, message.clone()));
        }
        match method {
            "eth_chainId" => Ok(json!(format!("{:#x}", self.chain.chain_id))),
            "eth_requestAccounts" => {
                if self.chain.reject_connect {
                    return Err(RpcError::UserRejected);
                }
                self.chain.authorized = true;
                Ok(json!(self.chain.accounts))
            }
            "eth_accounts" => {
                if self.chain.authorized {
                    Ok(json!(self.chain.accounts))
                } else {
                    Ok(json!([]))
                }
            }
            "eth_call" => self.eth_call(params),
            "eth_sendTransaction" => self.send_transaction(params),
            "eth_getTransactionReceipt" => Ok(self.receipt()),
            _ => Err(RpcError::from_code(-32601, format!("method not found: {method}"))),
        }
    }

    fn eth_call(&self, params: &Value) -> Result<Value, RpcError> {
        let to: Address = decode_result("eth_call", params[0]["to"].clone())?;
        let data: Bytes = decode_result("eth_call", params[0]["data"].clone())?;
        if to != CONTRACT_ADDRESS {
            return Ok(json!(Bytes::new()));
        }
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| RpcError::from_code(-32000, "execution reverted"))?;
        let output = if selector == IWhitelist::whitelistedAddressesCall::SELECTOR {
            let call = IWhitelist::whitelistedAddressesCall::abi_decode(&data)?;
            self.chain.whitelisted.contains(&call.account).abi_encode()
        } else if selector == IWhitelist::numAddressesWhitelistedCall::SELECTOR {
            U256::from(self.chain.whitelisted.len()).abi_encode()
        } else if selector == IWhitelist::maxWhitelistedAddressesCall::SELECTOR {
            U256::from(self.chain.capacity).abi_encode()
        } else {
            return Err(RpcError::from_code(-32000, "execution reverted"));
        };
        Ok(json!(Bytes::from(output)))
    }

    fn send_transaction(&mut self, params: &Value) -> Result<Value, RpcError> {
        if self.chain.tx_outcome == TxOutcome::Rejected {
            return Err(RpcError::UserRejected);
        }
        let from: Address = decode_result("eth_sendTransaction", params[0]["from"].clone())?;
        self.nonce += 1;
        let hash = keccak256(self.nonce.to_be_bytes());
        self.pending = Some(PendingTx { hash, from, polls_left: self.chain.pending_polls });
        Ok(json!(hash))
    }

    fn receipt(&mut self) -> Value {
        let Some(pending) = self.pending.as_mut() else {
            return Value::Null;
        };
        if pending.polls_left > 0 {
            pending.polls_left -= 1;
            return Value::Null;
        }
        let mined = self.chain.tx_outcome == TxOutcome::Mined;
        if mined {
            self.chain.whitelisted.insert(pending.from);
        }
        json!({
            "transactionHash": pending.hash,
            "blockNumber": "0x10",
            "status": if mined { "0x1" } else { "0x0" },
            "gasUsed": "0x5208",
        })
    }
}

/// [`Provider`] backed by a [`MockChain`].
#[derive(Debug, Default)]
pub struct MockProvider {
    state: RefCell<MockState>,
}

impl MockProvider {
    #[must_use]
    pub fn new(chain: MockChain) -> Self {
        Self { state: RefCell::new(MockState { chain, ..MockState::default() }) }
    }

    /// # Panics
    ///
    /// Panics if the chain is already mutably borrowed.
    #[must_use]
    pub fn chain(&self) -> Ref<'_, MockChain> {
        Ref::map(self.state.borrow(), |s| &s.chain)
    }

    /// # Panics
    ///
    /// Panics if the chain is already borrowed.
    #[must_use]
    pub fn chain_mut(&self) -> RefMut<'_, MockChain> {
        RefMut::map(self.state.borrow_mut(), |s| &mut s.chain)
    }

    /// Methods received so far, in order.
    #[must_use]
    pub fn methods(&self) -> Vec<String> {
        self.state.borrow().log.clone()
    }

    /// Durations passed to [`Provider::delay`], in order.
    #[must_use]
    pub fn delays(&self) -> Vec<Duration> {
        self.state.borrow().delays.clone()
    }
}

impl Provider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.state.borrow_mut().handle(method, &params)
    }

    async fn delay(&self, duration: Duration) {
        self.state.borrow_mut().delays.push(duration);
    }
}
