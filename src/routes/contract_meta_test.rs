use super::*;

#[test]
fn info_reports_fixed_address_and_network() {
    let info = contract_info();
    assert_eq!(info.address, "0xFa87253bd1775a4a83E78f5411dEDCf7daC81D2B");
    assert_eq!(info.chain_id, 5);
    assert_eq!(info.network, "Goerli");
}

#[test]
fn info_lists_functions_in_interface_order() {
    let names: Vec<_> = contract_info().functions.iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        vec!["addAddressToWhitelist", "maxWhitelistedAddresses", "numAddressesWhitelisted", "whitelistedAddresses"]
    );
}

#[test]
fn selectors_are_prefixed_hex() {
    for f in contract_info().functions {
        assert!(f.selector.starts_with("0x"), "{}", f.selector);
        assert_eq!(f.selector.len(), 10);
    }
}

#[tokio::test]
async fn endpoint_serializes_mutability_lowercase() {
    let Json(info) = get_contract().await;
    let json = serde_json::to_value(info).expect("json");
    assert_eq!(json["functions"][0]["mutability"], "nonpayable");
    assert_eq!(json["functions"][3]["signature"], "whitelistedAddresses(address)");
}
