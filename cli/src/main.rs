mod provider;


use std::time::Duration;

use clap::{Parser, Subcommand};
use contract::alloy_primitives::{Address, hex};
use contract::{FUNCTIONS, RECEIPT_POLL_INTERVAL, RpcError, WhitelistContract, rpc, wait_for_receipt};
use serde_json::{Value, json};

use provider::HttpProvider;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("node is on chain {actual}, expected {expected}; pass --any-chain to skip this check")]
    WrongChain { expected: u64, actual: u64 },
    #[error("timed out after {0}s waiting for the join transaction")]
    Timeout(u64),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "whitelist-cli", about = "Inspect and join the whitelist contract over JSON-RPC")]
struct Cli {
    #[arg(long, env = "WHITELIST_RPC_URL", default_value = "http://127.0.0.1:8545")]
    rpc_url: String,

    #[arg(long, env = "WHITELIST_CONTRACT", default_value_t = contract::CONTRACT_ADDRESS)]
    contract: Address,

    #[arg(long, env = "WHITELIST_CHAIN_ID", default_value_t = contract::REQUIRED_CHAIN_ID)]
    chain_id: u64,

    /// Skip the chain ID check (e.g. against a local dev node).
    #[arg(long, default_value_t = false)]
    any_chain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chain ID, contract address, whitelist size, and capacity.
    Info,
    /// Number of whitelisted addresses.
    Count,
    /// Maximum number of whitelisted addresses.
    Capacity,
    /// Whether an address is whitelisted.
    Check { address: Address },
    /// List the contract interface with selectors.
    Abi,
    /// Submit `addAddressToWhitelist()` from an account the node manages.
    Join {
        #[arg(long)]
        from: Address,

        #[arg(long, default_value_t = 120)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let provider = HttpProvider::new(cli.rpc_url.clone());
    run(&cli, &provider).await
}

async fn run(cli: &Cli, provider: &HttpProvider) -> Result<(), CliError> {
    let whitelist = WhitelistContract::new(provider, cli.contract);
    match &cli.command {
        Command::Abi => print_json(&abi_json()),
        Command::Info => {
            let chain_id = check_chain(cli, provider).await?;
            let count = whitelist.num_addresses_whitelisted().await?;
            let capacity = whitelist.max_whitelisted_addresses().await?;
            print_json(&json!({
                "rpc_url": provider.url(),
                "chain_id": chain_id,
                "contract": cli.contract.to_checksum(None),
                "whitelisted": count,
                "capacity": capacity,
            }))
        }
        Command::Count => {
            check_chain(cli, provider).await?;
            println!("{}", whitelist.num_addresses_whitelisted().await?);
            Ok(())
        }
        Command::Capacity => {
            check_chain(cli, provider).await?;
            println!("{}", whitelist.max_whitelisted_addresses().await?);
            Ok(())
        }
        Command::Check { address } => {
            check_chain(cli, provider).await?;
            println!("{}", whitelist.is_whitelisted(*address).await?);
            Ok(())
        }
        Command::Join { from, timeout_secs } => {
            check_chain(cli, provider).await?;
            let tx_hash = whitelist.add_address_to_whitelist(*from).await?;
            eprintln!("submitted {tx_hash}, waiting for confirmation");
            let receipt = tokio::time::timeout(
                Duration::from_secs(*timeout_secs),
                wait_for_receipt(provider, tx_hash, RECEIPT_POLL_INTERVAL),
            )
            .await
            .map_err(|_| CliError::Timeout(*timeout_secs))??;
            let count = whitelist.num_addresses_whitelisted().await?;
            print_json(&json!({
                "transaction_hash": receipt.transaction_hash,
                "block_number": receipt.block_number,
                "whitelisted": count,
            }))
        }
    }
}

async fn check_chain(cli: &Cli, provider: &HttpProvider) -> Result<u64, CliError> {
    let actual = rpc::chain_id(provider).await?;
    verify_chain(cli.chain_id, actual, cli.any_chain)?;
    Ok(actual)
}

fn verify_chain(expected: u64, actual: u64, any_chain: bool) -> Result<(), CliError> {
    if any_chain || expected == actual {
        Ok(())
    } else {
        Err(CliError::WrongChain { expected, actual })
    }
}

fn abi_json() -> Value {
    Value::Array(
        FUNCTIONS
            .iter()
            .map(|f| {
                json!({
                    "name": f.name,
                    "signature": f.signature(),
                    "selector": hex::encode_prefixed(f.selector()),
                    "inputs": f.inputs,
                    "outputs": f.outputs,
                    "mutability": f.mutability,
                })
            })
            .collect(),
    )
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
