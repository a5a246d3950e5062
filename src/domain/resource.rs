//! Service-relative resource paths
//!
//! The badge service and the explorer viewer both address a balance by the
//! same path shape (`evm/…` or `btc/…`). Rendering and parsing live on one
//! enum so a rendered path always parses back to the tuple it came from.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Bitcoin network selector for `btc/…` paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitcoinNetwork {
    #[default]
    Mainnet,
    Testnet,
    Signet,
}

impl BitcoinNetwork {
    pub const ALL: [BitcoinNetwork; 3] = [
        BitcoinNetwork::Mainnet,
        BitcoinNetwork::Testnet,
        BitcoinNetwork::Signet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BitcoinNetwork::Mainnet => "mainnet",
            BitcoinNetwork::Testnet => "testnet",
            BitcoinNetwork::Signet => "signet",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BitcoinNetwork::Mainnet => "Mainnet",
            BitcoinNetwork::Testnet => "Testnet",
            BitcoinNetwork::Signet => "Signet",
        }
    }
}

impl FromStr for BitcoinNetwork {
    type Err = ResourcePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(BitcoinNetwork::Mainnet),
            "testnet" => Ok(BitcoinNetwork::Testnet),
            "signet" => Ok(BitcoinNetwork::Signet),
            other => Err(ResourcePathError::BadNetwork(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourcePathError {
    #[error("empty resource path")]
    Empty,
    #[error("unknown source `{0}` (expected `evm` or `btc`)")]
    BadSource(String),
    #[error("invalid chain id")]
    BadChainId,
    #[error("unknown bitcoin network `{0}`")]
    BadNetwork(String),
    #[error("unknown query type `{0}`")]
    BadQueryType(String),
    #[error("missing address segment")]
    MissingAddress,
    #[error("unexpected trailing segment `{0}`")]
    TrailingSegment(String),
}

/// One fully-specified balance query, addressed as a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePath {
    EvmNativeBalance {
        chain_id: u64,
        address: String,
    },
    EvmErc20Balance {
        chain_id: u64,
        token_address: String,
        address: String,
    },
    BtcBalance {
        network: BitcoinNetwork,
        address: String,
    },
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourcePath::EvmNativeBalance { chain_id, address } => {
                write!(f, "evm/{chain_id}/balance/{address}")
            }
            ResourcePath::EvmErc20Balance {
                chain_id,
                token_address,
                address,
            } => write!(f, "evm/{chain_id}/erc20_balance/{token_address}/{address}"),
            ResourcePath::BtcBalance { network, address } => {
                write!(f, "btc/{}/balance/{address}", network.as_str())
            }
        }
    }
}

impl FromStr for ResourcePath {
    type Err = ResourcePathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let mut segments = path.split('/');
        let source = segments.next().filter(|s| !s.is_empty());

        let parsed = match source {
            None => return Err(ResourcePathError::Empty),
            Some("evm") => parse_evm(&mut segments)?,
            Some("btc") => parse_btc(&mut segments)?,
            Some(other) => return Err(ResourcePathError::BadSource(other.to_string())),
        };

        match segments.next() {
            None => Ok(parsed),
            Some(extra) => Err(ResourcePathError::TrailingSegment(extra.to_string())),
        }
    }
}

fn parse_evm<'a>(
    segments: &mut impl Iterator<Item = &'a str>,
) -> Result<ResourcePath, ResourcePathError> {
    let chain_id: u64 = segments
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or(ResourcePathError::BadChainId)?;

    let query_type = segments
        .next()
        .ok_or_else(|| ResourcePathError::BadQueryType(String::new()))?;

    match query_type {
        "balance" => Ok(ResourcePath::EvmNativeBalance {
            chain_id,
            address: next_address(segments)?,
        }),
        "erc20_balance" => {
            let token_address = next_address(segments)?;
            let address = next_address(segments)?;
            Ok(ResourcePath::EvmErc20Balance {
                chain_id,
                token_address,
                address,
            })
        }
        other => Err(ResourcePathError::BadQueryType(other.to_string())),
    }
}

fn parse_btc<'a>(
    segments: &mut impl Iterator<Item = &'a str>,
) -> Result<ResourcePath, ResourcePathError> {
    let network: BitcoinNetwork = segments
        .next()
        .ok_or_else(|| ResourcePathError::BadNetwork(String::new()))?
        .parse()?;

    match segments.next() {
        Some("balance") => {}
        Some(other) => return Err(ResourcePathError::BadQueryType(other.to_string())),
        None => return Err(ResourcePathError::BadQueryType(String::new())),
    }

    Ok(ResourcePath::BtcBalance {
        network,
        address: next_address(segments)?,
    })
}

fn next_address<'a>(
    segments: &mut impl Iterator<Item = &'a str>,
) -> Result<String, ResourcePathError> {
    segments
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(ResourcePathError::MissingAddress)
}
