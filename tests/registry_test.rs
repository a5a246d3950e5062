//! Registry lifecycle driven from a raw chainlist document

use badgesmith::domain::ChainRegistry;
use badgesmith::infrastructure::parse_chain_document;

const DOCUMENT: &str = r#"[
    {
        "name": "Ethereum Mainnet",
        "chain": "ETH",
        "network": "mainnet",
        "chainId": 1,
        "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 }
    },
    {
        "name": "Polygon Mainnet",
        "chainId": 137,
        "nativeCurrency": { "name": "POL", "symbol": "POL", "decimals": 18 }
    },
    {
        "name": "Sepolia",
        "title": "Ethereum Testnet Sepolia",
        "chainId": 11155111,
        "nativeCurrency": { "symbol": "ETH", "decimals": 18 }
    },
    {
        "name": "Ethereum",
        "chainId": 61,
        "nativeCurrency": { "symbol": "ETC", "decimals": 18 }
    },
    { "chainId": 424242 }
]"#;

#[test]
fn document_load_selects_mainnet_by_default() {
    let chains = parse_chain_document(DOCUMENT).unwrap();
    let mut registry = ChainRegistry::new();

    let default = registry.apply_loaded(chains);
    let default = default.expect("chain id 1 is present in the document");
    assert_eq!(default.chain_id, 1);
    assert_eq!(default.display_name, "Ethereum Mainnet");
    assert_eq!(default.native_currency_symbol.as_deref(), Some("ETH"));
    assert!(registry.is_ready());
}

#[test]
fn sparse_entries_survive_normalization() {
    let chains = parse_chain_document(DOCUMENT).unwrap();
    let nameless = chains.iter().find(|c| c.chain_id == 424242).unwrap();
    assert_eq!(nameless.display_name, "#424242");
    assert!(nameless.native_currency_symbol.is_none());
    assert!(!nameless.testnet);
}

#[test]
fn testnet_flag_comes_from_the_title_too() {
    let chains = parse_chain_document(DOCUMENT).unwrap();
    let sepolia = chains.iter().find(|c| c.chain_id == 11155111).unwrap();
    assert!(sepolia.testnet);
    let polygon = chains.iter().find(|c| c.chain_id == 137).unwrap();
    assert!(!polygon.testnet);
}

#[test]
fn search_promotes_the_exact_name_once() {
    let mut registry = ChainRegistry::new();
    registry.apply_loaded(parse_chain_document(DOCUMENT).unwrap());

    let ids: Vec<u64> = registry
        .search("ethereum")
        .iter()
        .map(|c| c.chain_id)
        .collect();
    // "Ethereum" (61) is the exact match; the rest keep loaded order
    assert_eq!(ids, vec![61, 1, 11155111]);
}

#[test]
fn search_matches_the_decimal_chain_id() {
    let mut registry = ChainRegistry::new();
    registry.apply_loaded(parse_chain_document(DOCUMENT).unwrap());

    let ids: Vec<u64> = registry.search("137").iter().map(|c| c.chain_id).collect();
    assert_eq!(ids, vec![137]);
}

#[test]
fn fetch_failure_is_a_terminal_state() {
    let mut registry = ChainRegistry::new();
    registry.apply_failed("Failed to fetch chain data".to_string());

    assert_eq!(registry.error(), Some("Failed to fetch chain data"));
    assert!(registry.selected().is_none());
    assert!(registry.search("ethereum").is_empty());
    assert!(registry.select(1).is_none());

    let late = registry.apply_loaded(parse_chain_document(DOCUMENT).unwrap());
    assert!(late.is_none());
    assert!(registry.error().is_some());
}

#[test]
fn selection_hands_back_the_full_descriptor() {
    let mut registry = ChainRegistry::new();
    registry.apply_loaded(parse_chain_document(DOCUMENT).unwrap());

    let polygon = registry.select(137).expect("known chain id");
    assert_eq!(polygon.display_name, "Polygon Mainnet");
    assert_eq!(polygon.native_currency_symbol.as_deref(), Some("POL"));
    assert_eq!(registry.selected().map(|c| c.chain_id), Some(137));

    assert!(registry.select(999999).is_none());
    // a failed lookup leaves the previous selection alone
    assert_eq!(registry.selected().map(|c| c.chain_id), Some(137));
}
