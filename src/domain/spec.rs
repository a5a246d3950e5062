//! The badge query spec: validation and URL derivation
//!
//! A [`BadgeQuerySpec`] is a snapshot of everything the user has entered.
//! [`BadgeQuerySpec::validate`] and [`BadgeQuerySpec::derive_urls`] are pure
//! functions of that snapshot; the app rebuilds the snapshot and re-derives
//! on every field change, so the outputs always reflect the latest input.

use url::form_urlencoded;

use super::address::{is_valid_bitcoin_address, is_valid_ethereum_address};
use super::chain::ChainDescriptor;
use super::resource::{BitcoinNetwork, ResourcePath};

pub const ADDRESS_ERROR_ETH: &str = "Invalid Ethereum address format";
pub const ADDRESS_ERROR_BTC: &str = "Invalid Bitcoin address format";
pub const TOKEN_ADDRESS_REQUIRED: &str = "Token address is required";
pub const TOKEN_ADDRESS_ERROR: &str = "Invalid ERC20 token address format";

/// Query kind for EVM chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvmQueryKind {
    #[default]
    NativeBalance,
    Erc20Balance,
}

/// Kind-specific half of the spec. The Ethereum and Bitcoin branches are
/// mutually exclusive, so they are a sum type rather than a pile of
/// optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetQuery {
    Evm {
        chain: Option<ChainDescriptor>,
        kind: EvmQueryKind,
        token_address: String,
    },
    Bitcoin {
        network: BitcoinNetwork,
    },
}

impl AssetQuery {
    /// Asset label used in the Markdown/HTML alt text.
    pub fn asset_label(&self) -> &'static str {
        match self {
            AssetQuery::Evm { .. } => "ethereum",
            AssetQuery::Bitcoin { .. } => "bitcoin",
        }
    }
}

/// Cosmetic parameters forwarded to the badge image service only. An empty
/// string means unset. `warning_threshold` is honored only while `color`
/// is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOverrides {
    pub color: String,
    pub warning_threshold: String,
    pub icon: String,
}

impl DisplayOverrides {
    /// Query string in fixed key order (`color`, `warning_threshold`,
    /// `icon`), percent-encoded, without the leading `?`. Empty when no
    /// override applies.
    pub fn query_string(&self) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());
        if !self.color.is_empty() {
            params.append_pair("color", &self.color);
        } else if !self.warning_threshold.is_empty() {
            params.append_pair("warning_threshold", &self.warning_threshold);
        }
        if !self.icon.is_empty() {
            params.append_pair("icon", &self.icon);
        }
        params.finish()
    }
}

/// Everything the user has entered, as one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeQuerySpec {
    pub address: String,
    pub query: AssetQuery,
    pub overrides: DisplayOverrides,
    pub link_to_explorer: bool,
}

/// Field-level validation outcome. Empty strings mean "no message": an
/// empty address leaves the spec invalid without raising a message, while
/// non-empty malformed input produces one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub address_error: String,
    pub token_address_error: String,
    pub valid: bool,
}

/// The two derived URLs. Both empty while the spec is invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedUrls {
    pub badge_image_url: String,
    pub explorer_link_url: String,
}

impl DerivedUrls {
    pub fn is_empty(&self) -> bool {
        self.badge_image_url.is_empty()
    }
}

/// Externally supplied service roots, never computed here.
#[derive(Debug, Clone)]
pub struct ServiceBases {
    pub badge: String,
    pub explorer: String,
}

impl BadgeQuerySpec {
    /// Run every applicable field check and combine them into validity.
    /// All messages are computed independently and surfaced together.
    pub fn validate(&self) -> Validation {
        let mut report = Validation::default();

        let address_ok = if self.address.is_empty() {
            // not yet entered: invalid but silent
            false
        } else {
            match &self.query {
                AssetQuery::Evm { .. } => {
                    if is_valid_ethereum_address(&self.address) {
                        true
                    } else {
                        report.address_error = ADDRESS_ERROR_ETH.to_string();
                        false
                    }
                }
                AssetQuery::Bitcoin { .. } => {
                    if is_valid_bitcoin_address(&self.address) {
                        true
                    } else {
                        report.address_error = ADDRESS_ERROR_BTC.to_string();
                        false
                    }
                }
            }
        };

        let token_ok = match &self.query {
            AssetQuery::Evm {
                kind: EvmQueryKind::Erc20Balance,
                token_address,
                ..
            } => {
                if token_address.is_empty() {
                    report.token_address_error = TOKEN_ADDRESS_REQUIRED.to_string();
                    false
                } else if !is_valid_ethereum_address(token_address) {
                    report.token_address_error = TOKEN_ADDRESS_ERROR.to_string();
                    false
                } else {
                    true
                }
            }
            _ => true,
        };

        report.valid = address_ok && token_ok;
        report
    }

    /// Resource path for a valid spec. `None` while invalid, or for an EVM
    /// query with no selected chain (nothing sensible to address).
    pub fn resource_path(&self) -> Option<ResourcePath> {
        if !self.validate().valid {
            return None;
        }
        match &self.query {
            AssetQuery::Evm {
                chain,
                kind,
                token_address,
            } => {
                let chain_id = chain.as_ref()?.chain_id;
                Some(match kind {
                    EvmQueryKind::NativeBalance => ResourcePath::EvmNativeBalance {
                        chain_id,
                        address: self.address.clone(),
                    },
                    EvmQueryKind::Erc20Balance => ResourcePath::EvmErc20Balance {
                        chain_id,
                        token_address: token_address.clone(),
                        address: self.address.clone(),
                    },
                })
            }
            AssetQuery::Bitcoin { network } => Some(ResourcePath::BtcBalance {
                network: *network,
                address: self.address.clone(),
            }),
        }
    }

    /// Derive both URLs, or clear them when the spec is invalid. Display
    /// overrides are appended to the badge image URL only.
    pub fn derive_urls(&self, bases: &ServiceBases) -> DerivedUrls {
        let Some(path) = self.resource_path() else {
            return DerivedUrls::default();
        };

        let overrides = self.overrides.query_string();
        let badge_image_url = if overrides.is_empty() {
            format!("{}/{}", bases.badge, path)
        } else {
            format!("{}/{}?{}", bases.badge, path, overrides)
        };

        DerivedUrls {
            badge_image_url,
            explorer_link_url: format!("{}/{}", bases.explorer, path),
        }
    }
}

/// Output modes offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
    ImageUrl,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Markdown,
        OutputFormat::Html,
        OutputFormat::ImageUrl,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "Markdown",
            OutputFormat::Html => "HTML",
            OutputFormat::ImageUrl => "Image URL",
        }
    }
}

/// Render the copyable snippet for a derived URL pair. Empty while there is
/// nothing to show.
pub fn render_snippet(spec: &BadgeQuerySpec, urls: &DerivedUrls, format: OutputFormat) -> String {
    if urls.is_empty() {
        return String::new();
    }
    let alt = format!("{} Balance", spec.query.asset_label());
    match format {
        OutputFormat::Markdown => {
            if spec.link_to_explorer {
                format!(
                    "[![{alt}]({})]({})",
                    urls.badge_image_url, urls.explorer_link_url
                )
            } else {
                format!("![{alt}]({})", urls.badge_image_url)
            }
        }
        OutputFormat::Html => {
            let img = format!("<img src=\"{}\" alt=\"{alt}\" />", urls.badge_image_url);
            if spec.link_to_explorer {
                format!("<a href=\"{}\">{img}</a>", urls.explorer_link_url)
            } else {
                img
            }
        }
        OutputFormat::ImageUrl => urls.badge_image_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mainnet() -> ChainDescriptor {
        ChainDescriptor {
            chain_id: 1,
            display_name: "Ethereum Mainnet".to_string(),
            title: None,
            native_currency_symbol: Some("ETH".to_string()),
            native_currency_decimals: Some(18),
            testnet: false,
        }
    }

    fn bases() -> ServiceBases {
        ServiceBases {
            badge: "http://localhost:8080/badge".to_string(),
            explorer: "http://localhost:8080/scanner".to_string(),
        }
    }

    fn eth_spec(address: &str) -> BadgeQuerySpec {
        BadgeQuerySpec {
            address: address.to_string(),
            query: AssetQuery::Evm {
                chain: Some(mainnet()),
                kind: EvmQueryKind::NativeBalance,
                token_address: String::new(),
            },
            overrides: DisplayOverrides::default(),
            link_to_explorer: true,
        }
    }

    const HOLDER: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    #[test]
    fn empty_address_is_silently_invalid() {
        let report = eth_spec("").validate();
        assert!(!report.valid);
        assert_eq!(report.address_error, "");
        assert_eq!(eth_spec("").derive_urls(&bases()), DerivedUrls::default());
    }

    #[test]
    fn malformed_address_gets_a_message() {
        let report = eth_spec("0x1234").validate();
        assert!(!report.valid);
        assert_eq!(report.address_error, ADDRESS_ERROR_ETH);
    }

    #[test]
    fn erc20_requires_token_address() {
        let mut spec = eth_spec(HOLDER);
        spec.query = AssetQuery::Evm {
            chain: Some(mainnet()),
            kind: EvmQueryKind::Erc20Balance,
            token_address: String::new(),
        };
        let report = spec.validate();
        assert!(!report.valid);
        assert_eq!(report.address_error, "");
        assert_eq!(report.token_address_error, TOKEN_ADDRESS_REQUIRED);

        spec.query = AssetQuery::Evm {
            chain: Some(mainnet()),
            kind: EvmQueryKind::Erc20Balance,
            token_address: "nothex".to_string(),
        };
        assert_eq!(spec.validate().token_address_error, TOKEN_ADDRESS_ERROR);
    }

    #[test]
    fn both_errors_surface_together() {
        let spec = BadgeQuerySpec {
            address: "bogus".to_string(),
            query: AssetQuery::Evm {
                chain: Some(mainnet()),
                kind: EvmQueryKind::Erc20Balance,
                token_address: "also-bogus".to_string(),
            },
            overrides: DisplayOverrides::default(),
            link_to_explorer: true,
        };
        let report = spec.validate();
        assert_eq!(report.address_error, ADDRESS_ERROR_ETH);
        assert_eq!(report.token_address_error, TOKEN_ADDRESS_ERROR);
    }

    #[test]
    fn bitcoin_never_checks_token_address() {
        let spec = BadgeQuerySpec {
            address: "mk6eQbnNDrqm2UhHtgCNHXZSzyyTupoWnG".to_string(),
            query: AssetQuery::Bitcoin {
                network: BitcoinNetwork::Testnet,
            },
            overrides: DisplayOverrides::default(),
            link_to_explorer: true,
        };
        let report = spec.validate();
        assert!(report.valid);
        assert_eq!(report.token_address_error, "");
    }

    #[test]
    fn evm_without_selected_chain_derives_nothing() {
        let mut spec = eth_spec(HOLDER);
        spec.query = AssetQuery::Evm {
            chain: None,
            kind: EvmQueryKind::NativeBalance,
            token_address: String::new(),
        };
        assert!(spec.validate().valid);
        assert!(spec.resource_path().is_none());
        assert!(spec.derive_urls(&bases()).is_empty());
    }

    #[test]
    fn color_suppresses_warning_threshold() {
        let overrides = DisplayOverrides {
            color: "red".to_string(),
            warning_threshold: "0.1".to_string(),
            icon: String::new(),
        };
        assert_eq!(overrides.query_string(), "color=red");

        let threshold_only = DisplayOverrides {
            warning_threshold: "0.1".to_string(),
            ..DisplayOverrides::default()
        };
        assert_eq!(threshold_only.query_string(), "warning_threshold=0.1");
    }

    #[test]
    fn override_values_are_percent_encoded_in_fixed_order() {
        let overrides = DisplayOverrides {
            color: "dark red".to_string(),
            warning_threshold: String::new(),
            icon: "bitcoin&co".to_string(),
        };
        assert_eq!(overrides.query_string(), "color=dark+red&icon=bitcoin%26co");
    }

    #[test]
    fn explorer_url_never_carries_overrides() {
        let mut spec = eth_spec(HOLDER);
        spec.overrides.color = "blue".to_string();
        let urls = spec.derive_urls(&bases());
        assert_eq!(
            urls.badge_image_url,
            format!("http://localhost:8080/badge/evm/1/balance/{HOLDER}?color=blue")
        );
        assert_eq!(
            urls.explorer_link_url,
            format!("http://localhost:8080/scanner/evm/1/balance/{HOLDER}")
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let spec = eth_spec(HOLDER);
        assert_eq!(spec.derive_urls(&bases()), spec.derive_urls(&bases()));
    }

    #[test]
    fn snippets_follow_link_toggle() {
        let mut spec = eth_spec(HOLDER);
        let urls = spec.derive_urls(&bases());
        assert_eq!(
            render_snippet(&spec, &urls, OutputFormat::Markdown),
            format!(
                "[![ethereum Balance]({})]({})",
                urls.badge_image_url, urls.explorer_link_url
            )
        );
        assert_eq!(
            render_snippet(&spec, &urls, OutputFormat::Html),
            format!(
                "<a href=\"{}\"><img src=\"{}\" alt=\"ethereum Balance\" /></a>",
                urls.explorer_link_url, urls.badge_image_url
            )
        );
        assert_eq!(
            render_snippet(&spec, &urls, OutputFormat::ImageUrl),
            urls.badge_image_url
        );

        spec.link_to_explorer = false;
        assert_eq!(
            render_snippet(&spec, &urls, OutputFormat::Markdown),
            format!("![ethereum Balance]({})", urls.badge_image_url)
        );
        assert_eq!(
            render_snippet(&spec, &urls, OutputFormat::Html),
            format!(
                "<img src=\"{}\" alt=\"ethereum Balance\" />",
                urls.badge_image_url
            )
        );
    }
}
