//! Market data payloads: search hits, coin profiles and spot prices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One hit from the symbol search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    /// Provider-internal coin id (e.g. "bitcoin").
    pub id: String,
    pub name: String,
    pub symbol: String,
}

/// Point-in-time spot quote in USD.
///
/// Field names match the provider's `simple/price` response so the struct
/// deserializes directly from the per-coin object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub usd: Option<f64>,
    pub usd_market_cap: Option<f64>,
    pub usd_24h_vol: Option<f64>,
    pub usd_24h_change: Option<f64>,
    /// When the quote was taken. Stamped by the adapter, not the provider.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Localized description block. Only English is consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub en: Option<String>,
}

/// Official links section of a coin profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinLinks {
    #[serde(default)]
    pub homepage: Vec<String>,
    #[serde(default)]
    pub whitepaper: Option<String>,
    #[serde(default)]
    pub repos_url: RepoLinks,
    #[serde(default)]
    pub twitter_screen_name: Option<String>,
    #[serde(default)]
    pub telegram_channel_identifier: Option<String>,
}

/// Source repository links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoLinks {
    #[serde(default)]
    pub github: Vec<String>,
}

/// Supply figures from the profile's market data section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyFigures {
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
}

/// Per-chain deployment entry of the `detail_platforms` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformDetail {
    #[serde(default)]
    pub decimal_place: Option<i64>,
    #[serde(default)]
    pub contract_address: Option<String>,
}

/// Full coin profile from the detail endpoint.
///
/// Every nested section is optional; a missing section deserializes to its
/// structurally-empty default. `detail_platforms` is a `BTreeMap` so that
/// the contract-address fallback iterates chains in a deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinProfile {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub links: CoinLinks,
    #[serde(default)]
    pub market_data: SupplyFigures,
    #[serde(default)]
    pub detail_platforms: BTreeMap<String, PlatformDetail>,
}
