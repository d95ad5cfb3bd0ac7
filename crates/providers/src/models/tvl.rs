//! TVL payloads: protocol listings and chain totals.

use serde::{Deserialize, Serialize};

/// One protocol from the provider-wide protocol listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub tvl: Option<f64>,
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Locked value of one chain, provider-wide (not token-specific).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainTvl {
    pub name: String,
    #[serde(default)]
    pub tvl: Option<f64>,
}
