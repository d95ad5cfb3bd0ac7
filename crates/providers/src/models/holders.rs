//! On-chain holder distribution payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One holder of the token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    pub wallet_address: String,
    /// Raw integer balance as a decimal string (can exceed u64).
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub first_acquired: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_initiated_transfer: Option<bool>,
}

/// One page of the holder listing, with a continuation cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolderPage {
    #[serde(default)]
    pub token_address: Option<String>,
    #[serde(default)]
    pub chain_id: Option<i64>,
    #[serde(default)]
    pub holders: Vec<Holder>,
    #[serde(default)]
    pub next_offset: Option<String>,
}

impl HolderPage {
    /// True when no holders were resolved (absence, not an error).
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}
