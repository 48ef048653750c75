//! Contract metadata endpoint.
//!
//! Exposes the fixed contract reference so tooling can verify which address,
//! network, and selectors the page was built against.

#[cfg(test)]
#[path = "contract_meta_test.rs"]
mod contract_meta_test;

use axum::Json;
use contract::alloy_primitives::hex;
use contract::{CONTRACT_ADDRESS, FUNCTIONS, FunctionDescriptor, Mutability};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FunctionInfo {
    pub name: &'static str,
    pub signature: String,
    pub selector: String,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub mutability: Mutability,
}

impl From<&FunctionDescriptor> for FunctionInfo {
    fn from(f: &FunctionDescriptor) -> Self {
        Self {
            name: f.name,
            signature: f.signature(),
            selector: hex::encode_prefixed(f.selector()),
            inputs: f.inputs,
            outputs: f.outputs,
            mutability: f.mutability,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractInfo {
    pub address: String,
    pub chain_id: u64,
    pub network: &'static str,
    pub network_prompt: &'static str,
    pub functions: Vec<FunctionInfo>,
}

pub fn contract_info() -> ContractInfo {
    ContractInfo {
        address: CONTRACT_ADDRESS.to_checksum(None),
        chain_id: contract::REQUIRED_CHAIN_ID,
        network: contract::REQUIRED_NETWORK_NAME,
        network_prompt: contract::WRONG_NETWORK_PROMPT,
        functions: FUNCTIONS.iter().map(FunctionInfo::from).collect(),
    }
}

/// `GET /api/contract`
pub async fn get_contract() -> Json<ContractInfo> {
    Json(contract_info())
}
