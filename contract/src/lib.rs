//! Shared contract reference, typed bindings, and JSON-RPC provider seam.
//!
//! This crate owns everything the page, the server, and the CLI agree on:
//! the fixed whitelist contract address, its four-function interface, the
//! single supported network, and the `Provider` abstraction that both the
//! browser wallet and the HTTP node client implement.
//!
//! DESIGN
//! ======
//! Calldata encoding and return decoding come from `alloy_sol_types::sol!`.
//! The hand-written [`FUNCTIONS`] table mirrors the same interface as plain
//! data so it can be listed, served as JSON, and cross-checked against the
//! generated selectors.

pub mod binding;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod rpc;

use alloy_primitives::{Address, address, keccak256};
use alloy_sol_types::sol;
use serde::Serialize;

pub use alloy_primitives;
pub use binding::{RECEIPT_POLL_INTERVAL, TransactionReceipt, WhitelistContract, wait_for_receipt};
pub use rpc::{JsonRpcErrorObject, Provider, RpcError};

/// Deployed address of the whitelist contract.
pub const CONTRACT_ADDRESS: Address = address!("Fa87253bd1775a4a83E78f5411dEDCf7daC81D2B");

/// Chain ID of the only network the contract is deployed on (Goerli).
pub const REQUIRED_CHAIN_ID: u64 = 5;

/// Human-readable name of [`REQUIRED_CHAIN_ID`].
pub const REQUIRED_NETWORK_NAME: &str = "Goerli";

/// Prompt shown to the user when their wallet is on any other network.
pub const WRONG_NETWORK_PROMPT: &str = "Change the network to Goerli";

sol! {
    /// Solidity interface of the deployed whitelist contract.
    interface IWhitelist {
        function addAddressToWhitelist() external;
        function maxWhitelistedAddresses() external view returns (uint256);
        function numAddressesWhitelisted() external view returns (uint8);
        function whitelistedAddresses(address account) external view returns (bool);
    }
}

/// State mutability of a contract function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// Changes contract state; requires a signed transaction.
    NonPayable,
    /// Reads state only; served by `eth_call`.
    View,
}

impl Mutability {
    #[must_use]
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::View)
    }
}

/// Static description of one callable contract entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub mutability: Mutability,
}

impl FunctionDescriptor {
    /// Canonical signature used for selector hashing, e.g. `whitelistedAddresses(address)`.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.inputs.join(","))
    }

    /// First four bytes of the keccak-256 hash of [`Self::signature`].
    #[must_use]
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.signature().as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }
}

/// Contract interface in declaration order.
pub const FUNCTIONS: [FunctionDescriptor; 4] = [
    FunctionDescriptor {
        name: "addAddressToWhitelist",
        inputs: &[],
        outputs: &[],
        mutability: Mutability::NonPayable,
    },
    FunctionDescriptor {
        name: "maxWhitelistedAddresses",
        inputs: &[],
        outputs: &["uint256"],
        mutability: Mutability::View,
    },
    FunctionDescriptor {
        name: "numAddressesWhitelisted",
        inputs: &[],
        outputs: &["uint8"],
        mutability: Mutability::View,
    },
    FunctionDescriptor {
        name: "whitelistedAddresses",
        inputs: &["address"],
        outputs: &["bool"],
        mutability: Mutability::View,
    },
];

/// Look up a descriptor by function name.
#[must_use]
pub fn function(name: &str) -> Option<&'static FunctionDescriptor> {
    FUNCTIONS.iter().find(|f| f.name == name)
}
