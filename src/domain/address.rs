//! Address format checks for the supported asset kinds

/// Check for the fixed-length hex Ethereum address form: `0x` + 40 hex digits.
pub fn is_valid_ethereum_address(address: &str) -> bool {
    let Some(payload) = address.strip_prefix("0x") else {
        return false;
    };
    payload.len() == 40 && payload.chars().all(|c| c.is_ascii_hexdigit())
}

/// Check for the recognized Bitcoin address families:
/// Legacy `1…`, P2SH `3…`, Bech32 `bc1…`, Testnet `m…`/`n…`/`2…`,
/// Testnet Bech32 `tb1…`, each followed by 25-89 alphanumeric characters.
pub fn is_valid_bitcoin_address(address: &str) -> bool {
    let rest = if let Some(rest) = address.strip_prefix("bc1") {
        rest
    } else if let Some(rest) = address.strip_prefix("tb1") {
        rest
    } else if let Some(rest) = address
        .strip_prefix('1')
        .or_else(|| address.strip_prefix('3'))
        .or_else(|| address.strip_prefix('m'))
        .or_else(|| address.strip_prefix('n'))
        .or_else(|| address.strip_prefix('2'))
    {
        rest
    } else {
        return false;
    };

    (25..=89).contains(&rest.len()) && rest.chars().all(|c| c.is_ascii_alphanumeric())
}
