//! Canonical token record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coinlens_providers::{
    ChainTvl, CoinProfile, HolderPage, PriceSnapshot, ProjectMetadata, Protocol,
};

use super::types::Symbol;

/// The canonical reconciled token record - the unit of storage.
///
/// One record per (symbol, calendar day) is ever "current"; historical
/// records per symbol may coexist across days. Every section besides the
/// identity fields is optional: a degraded record with missing sections is
/// a valid record, distinguishable from "no token found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    /// Unique record id (uuid v4).
    pub id: String,
    /// Upper-cased trading symbol; natural key together with creation day.
    pub symbol: Symbol,
    /// Display name from the market-data provider's match.
    pub display_name: Option<String>,
    /// The market-data provider's internal coin id.
    pub source_id: Option<String>,
    /// Reconciled contract address (first non-empty across the fallback chain).
    pub contract_address: Option<String>,
    /// Point-in-time quote, overwritten on same-day refresh.
    pub price: Option<PriceSnapshot>,
    /// Full coin profile (description, links, supply, platform map).
    pub profile: Option<CoinProfile>,
    /// On-chain holder distribution; empty means "not yet resolved".
    pub holders: HolderPage,
    /// Protocols textually related to the symbol/name.
    pub protocols: Vec<Protocol>,
    /// Provider-wide chain TVL table, attached verbatim.
    pub chain_tvls: Vec<ChainTvl>,
    /// Project metadata, populated only when the fallback resolver succeeded.
    pub metadata: Option<ProjectMetadata>,
    /// Creation time; its calendar day is the versioning key.
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TokenRecord {
    /// The mutable-field patch applied on a same-day refresh.
    /// Identity fields (`id`, `symbol`, `created_at`) are not part of it.
    pub fn as_patch(&self) -> RecordPatch {
        RecordPatch {
            display_name: self.display_name.clone(),
            source_id: self.source_id.clone(),
            contract_address: self.contract_address.clone(),
            price: self.price.clone(),
            profile: self.profile.clone(),
            holders: self.holders.clone(),
            protocols: self.protocols.clone(),
            chain_tvls: self.chain_tvls.clone(),
            metadata: self.metadata.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// The fields a same-day refresh overwrites on an existing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    pub display_name: Option<String>,
    pub source_id: Option<String>,
    pub contract_address: Option<String>,
    pub price: Option<PriceSnapshot>,
    pub profile: Option<CoinProfile>,
    pub holders: HolderPage,
    pub protocols: Vec<Protocol>,
    pub chain_tvls: Vec<ChainTvl>,
    pub metadata: Option<ProjectMetadata>,
    pub updated_at: DateTime<Utc>,
}

impl RecordPatch {
    /// Apply this patch to a record in place.
    pub fn apply_to(self, record: &mut TokenRecord) {
        record.display_name = self.display_name;
        record.source_id = self.source_id;
        record.contract_address = self.contract_address;
        record.price = self.price;
        record.profile = self.profile;
        record.holders = self.holders;
        record.protocols = self.protocols;
        record.chain_tvls = self.chain_tvls;
        record.metadata = self.metadata;
        record.updated_at = self.updated_at;
    }
}

/// One page of a listing, with the total count and derived page count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
        }
    }

    /// Number of pages at the current page size.
    pub fn pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total + self.page_size - 1) / self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_pages() {
        let page: Paginated<i32> = Paginated::new(vec![], 0, 1, 10);
        assert_eq!(page.pages(), 0);

        let page: Paginated<i32> = Paginated::new(vec![], 10, 1, 10);
        assert_eq!(page.pages(), 1);

        let page: Paginated<i32> = Paginated::new(vec![], 11, 1, 10);
        assert_eq!(page.pages(), 2);
    }

    #[test]
    fn test_patch_apply_preserves_identity() {
        let now = Utc::now();
        let mut record = TokenRecord {
            id: "abc".to_string(),
            symbol: Symbol::new("BTC"),
            display_name: Some("Bitcoin".to_string()),
            source_id: Some("bitcoin".to_string()),
            contract_address: None,
            price: None,
            profile: None,
            holders: HolderPage::default(),
            protocols: vec![],
            chain_tvls: vec![],
            metadata: None,
            created_at: now,
            updated_at: now,
        };

        let later = now + chrono::Duration::hours(2);
        let patch = RecordPatch {
            display_name: Some("Bitcoin".to_string()),
            source_id: Some("bitcoin".to_string()),
            contract_address: None,
            price: Some(PriceSnapshot {
                usd: Some(64000.0),
                ..Default::default()
            }),
            profile: None,
            holders: HolderPage::default(),
            protocols: vec![],
            chain_tvls: vec![],
            metadata: None,
            updated_at: later,
        };

        patch.apply_to(&mut record);
        assert_eq!(record.id, "abc");
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, later);
        assert_eq!(record.price.unwrap().usd, Some(64000.0));
    }
}
