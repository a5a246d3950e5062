//! Normalized chain metadata and ranked search over a loaded snapshot

use serde::Deserialize;

/// Search results are capped so the picker list stays scannable.
pub const SEARCH_RESULT_CAP: usize = 25;

/// One entry of the chainid.network document, as published. Everything the
/// document may omit is optional so one sparse entry cannot fail the load.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChain {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    pub chain_id: u64,
    #[serde(default)]
    pub native_currency: Option<RawNativeCurrency>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNativeCurrency {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

/// Normalized metadata for one network. Materialized once per registry load,
/// immutable for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub chain_id: u64,
    pub display_name: String,
    /// Document title, kept for search: an entry like Sepolia carries the
    /// network family only in its title.
    pub title: Option<String>,
    pub native_currency_symbol: Option<String>,
    pub native_currency_decimals: Option<u8>,
    pub testnet: bool,
}

impl ChainDescriptor {
    pub fn normalize(raw: RawChain) -> Self {
        let testnet = is_testnet_name(raw.name.as_deref())
            || is_testnet_name(raw.title.as_deref())
            || is_testnet_name(raw.network.as_deref());

        let display_name = first_non_empty(&[raw.name.as_deref(), raw.title.as_deref()])
            .unwrap_or_else(|| format!("#{}", raw.chain_id));

        let title = raw
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let (symbol, decimals) = raw
            .native_currency
            .map(|currency| {
                (
                    currency.symbol.filter(|s| !s.trim().is_empty()),
                    currency.decimals,
                )
            })
            .unwrap_or((None, None));

        Self {
            chain_id: raw.chain_id,
            display_name,
            title,
            native_currency_symbol: symbol,
            native_currency_decimals: decimals,
            testnet,
        }
    }

    /// Picker label, e.g. `Ethereum Mainnet (1)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.chain_id)
    }
}

fn is_testnet_name(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let lower = value.to_lowercase();
    lower.contains("test") || lower.contains("devnet")
}

fn first_non_empty(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Ranked substring search over a loaded snapshot.
///
/// An empty query returns entries as loaded. Otherwise entries whose display
/// name, document title, or decimal chain id contains the query
/// (case-insensitively) match, and at most one entry whose display name
/// equals the query is promoted to the front; every other match keeps its
/// as-loaded relative order.
pub fn search<'a>(chains: &'a [ChainDescriptor], query: &str) -> Vec<&'a ChainDescriptor> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return chains.iter().take(SEARCH_RESULT_CAP).collect();
    }

    let mut exact: Option<&ChainDescriptor> = None;
    let mut rest: Vec<&ChainDescriptor> = Vec::new();

    for chain in chains {
        let name = chain.display_name.to_lowercase();
        let title_matches = chain
            .title
            .as_ref()
            .is_some_and(|title| title.to_lowercase().contains(&query));
        if !name.contains(&query)
            && !title_matches
            && !chain.chain_id.to_string().contains(&query)
        {
            continue;
        }
        if exact.is_none() && name == query {
            exact = Some(chain);
        } else {
            rest.push(chain);
        }
    }

    let mut results = Vec::with_capacity(rest.len() + 1);
    if let Some(chain) = exact {
        results.push(chain);
    }
    results.extend(rest);
    results.truncate(SEARCH_RESULT_CAP);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(name: &str, chain_id: u64) -> ChainDescriptor {
        ChainDescriptor {
            chain_id,
            display_name: name.to_string(),
            title: None,
            native_currency_symbol: None,
            native_currency_decimals: None,
            testnet: false,
        }
    }

    #[test]
    fn testnet_flag_from_any_naming_field() {
        let testnet = ChainDescriptor::normalize(RawChain {
            name: Some("Sepolia Testnet".into()),
            chain_id: 11155111,
            ..RawChain::default()
        });
        assert!(testnet.testnet);

        let devnet = ChainDescriptor::normalize(RawChain {
            name: Some("SomeChain".into()),
            network: Some("devnet".into()),
            chain_id: 99,
            ..RawChain::default()
        });
        assert!(devnet.testnet);

        let mainnet = ChainDescriptor::normalize(RawChain {
            name: Some("Ethereum Mainnet".into()),
            network: Some("mainnet".into()),
            chain_id: 1,
            ..RawChain::default()
        });
        assert!(!mainnet.testnet);
    }

    #[test]
    fn display_name_prefers_name_then_title() {
        let titled = ChainDescriptor::normalize(RawChain {
            title: Some("Polygon Mainnet".into()),
            chain_id: 137,
            ..RawChain::default()
        });
        assert_eq!(titled.display_name, "Polygon Mainnet");

        let nameless = ChainDescriptor::normalize(RawChain {
            chain_id: 42,
            ..RawChain::default()
        });
        assert_eq!(nameless.display_name, "#42");
    }

    #[test]
    fn exact_name_match_is_promoted() {
        let chains = vec![chain("Polygon", 137), chain("Ethereum", 1)];
        let results = search(&chains, "ethereum");
        assert_eq!(results[0].chain_id, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn substring_matches_keep_loaded_order() {
        let chains = vec![
            chain("Ethereum Classic", 61),
            chain("Ethereum", 1),
            chain("EthereumFair", 513100),
        ];
        let results = search(&chains, "ethereum");
        let ids: Vec<u64> = results.iter().map(|c| c.chain_id).collect();
        // exact match promoted, others keep relative order
        assert_eq!(ids, vec![1, 61, 513100]);
    }

    #[test]
    fn title_matches_even_when_the_name_wins_the_display() {
        let sepolia = ChainDescriptor::normalize(RawChain {
            name: Some("Sepolia".into()),
            title: Some("Ethereum Testnet Sepolia".into()),
            chain_id: 11155111,
            ..RawChain::default()
        });
        assert_eq!(sepolia.display_name, "Sepolia");
        let chains = vec![sepolia, chain("Polygon", 137)];

        let results = search(&chains, "ethereum");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chain_id, 11155111);
    }

    #[test]
    fn whitespace_query_filters_like_any_substring() {
        let chains = vec![chain("Ethereum Mainnet", 1), chain("Sepolia", 11155111)];

        let results = search(&chains, " ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chain_id, 1);

        assert!(search(&chains, "  ").is_empty());
    }

    #[test]
    fn chain_id_substring_matches() {
        let chains = vec![chain("Polygon", 137), chain("Ethereum", 1)];
        let results = search(&chains, "13");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chain_id, 137);
    }

    #[test]
    fn results_are_capped() {
        let chains: Vec<ChainDescriptor> =
            (0..100).map(|i| chain(&format!("Net {i}"), i)).collect();
        assert_eq!(search(&chains, "net").len(), SEARCH_RESULT_CAP);
        assert_eq!(search(&chains, "").len(), SEARCH_RESULT_CAP);
    }
}
