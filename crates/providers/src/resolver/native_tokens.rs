//! Allow-list of native chain tokens.
//!
//! Native tokens have no contract address, so metadata lookup for them goes
//! through symbol search instead. The list is keyed by the market-data
//! provider's coin id.

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    static ref NATIVE_TOKEN_SYMBOLS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("bitcoin", "BTC");
        m.insert("ethereum", "ETH");
        m.insert("solana", "SOL");
        m.insert("cardano", "ADA");
        m.insert("polkadot", "DOT");
        m.insert("avalanche-2", "AVAX");
        m.insert("polygon", "MATIC");
        m.insert("binancecoin", "BNB");
        m.insert("chainlink", "LINK");
        m
    };
}

/// The search symbol for a native token, or `None` when the coin id is not
/// on the allow-list.
pub fn native_symbol(coin_id: &str) -> Option<&'static str> {
    NATIVE_TOKEN_SYMBOLS.get(coin_id).copied()
}

/// True when the coin id names a native chain token.
pub fn is_native_token(coin_id: &str) -> bool {
    NATIVE_TOKEN_SYMBOLS.contains_key(coin_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_symbol_lookup() {
        assert_eq!(native_symbol("bitcoin"), Some("BTC"));
        assert_eq!(native_symbol("avalanche-2"), Some("AVAX"));
        assert_eq!(native_symbol("chainlink"), Some("LINK"));
        assert_eq!(native_symbol("aave"), None);
    }

    #[test]
    fn test_is_native_token() {
        assert!(is_native_token("ethereum"));
        assert!(!is_native_token("uniswap"));
    }
}
