use super::*;
use crate::mock::{MockChain, MockProvider, TxOutcome};
use futures::executor::block_on;

#[test]
fn reads_whitelist_size_and_capacity() {
    let provider = MockProvider::new(MockChain { capacity: 10, ..MockChain::default() }.with_members(4));
    let contract = WhitelistContract::deployed(&provider);

    assert_eq!(block_on(contract.num_addresses_whitelisted()).expect("count"), 4);
    assert_eq!(block_on(contract.max_whitelisted_addresses()).expect("capacity"), 10);
}

#[test]
fn membership_reflects_whitelist() {
    let provider = MockProvider::new(MockChain::default().with_members(2));
    let contract = WhitelistContract::deployed(&provider);

    assert!(block_on(contract.is_whitelisted(Address::with_last_byte(1))).expect("member"));
    assert!(!block_on(contract.is_whitelisted(MockChain::default_account())).expect("non-member"));
}

#[test]
fn reads_use_eth_call() {
    let provider = MockProvider::new(MockChain::default());
    let contract = WhitelistContract::deployed(&provider);
    block_on(contract.num_addresses_whitelisted()).expect("count");
    assert_eq!(provider.methods(), vec!["eth_call".to_owned()]);
}

#[test]
fn call_against_empty_address_fails_to_decode() {
    let provider = MockProvider::new(MockChain::default());
    let contract = WhitelistContract::new(&provider, Address::ZERO);
    assert!(matches!(block_on(contract.is_whitelisted(Address::ZERO)), Err(RpcError::Abi(_))));
}

#[test]
fn join_then_wait_adds_sender() {
    let provider = MockProvider::new(MockChain { pending_polls: 2, ..MockChain::default() });
    let contract = WhitelistContract::deployed(&provider);
    let account = MockChain::default_account();

    let tx_hash = block_on(contract.add_address_to_whitelist(account)).expect("submit");
    let receipt = block_on(wait_for_receipt(&provider, tx_hash, RECEIPT_POLL_INTERVAL)).expect("receipt");

    assert_eq!(receipt.transaction_hash, tx_hash);
    assert!(receipt.succeeded());
    assert_eq!(provider.delays(), vec![RECEIPT_POLL_INTERVAL, RECEIPT_POLL_INTERVAL]);
    assert!(block_on(contract.is_whitelisted(account)).expect("member"));
}

#[test]
fn reverted_receipt_is_an_error() {
    let provider = MockProvider::new(MockChain { tx_outcome: TxOutcome::Reverted, ..MockChain::default() });
    let contract = WhitelistContract::deployed(&provider);

    let tx_hash = block_on(contract.add_address_to_whitelist(MockChain::default_account())).expect("submit");
    match block_on(wait_for_receipt(&provider, tx_hash, RECEIPT_POLL_INTERVAL)) {
        Err(RpcError::Reverted { tx_hash: reverted }) => assert_eq!(reverted, tx_hash),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn rejected_submission_is_user_rejected() {
    let provider = MockProvider::new(MockChain { tx_outcome: TxOutcome::Rejected, ..MockChain::default() });
    let contract = WhitelistContract::deployed(&provider);
    assert!(matches!(
        block_on(contract.add_address_to_whitelist(MockChain::default_account())),
        Err(RpcError::UserRejected)
    ));
}

#[test]
fn receipt_without_status_counts_as_success() {
    let receipt: TransactionReceipt = serde_json::from_value(serde_json::json!({
        "transactionHash": B256::ZERO,
        "blockNumber": "0x1",
    }))
    .expect("receipt");
    assert!(receipt.succeeded());
}
