//! Service-level tests with an in-memory store and counting mock providers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use coinlens_providers::{
    ChainTvl, ChainTvlProvider, CoinProfile, CoinSummary, FetchError, HolderPage, HolderProvider,
    MarketDataProvider, PlatformDetail, PriceSnapshot, ProjectMetadata, ProjectMetadataProvider,
    Protocol, ProtocolTvlProvider,
};

use super::model::{Paginated, RecordPatch, TokenRecord};
use super::service::TokenService;
use super::store::RecordStore;
use super::types::{Day, Symbol};
use crate::errors::{DatabaseError, Error, Result};

// =============================================================================
// In-memory store
// =============================================================================

/// In-memory record store with the same upsert semantics as the SQLite
/// repository.
#[derive(Default)]
struct MemoryStore {
    records: Mutex<Vec<TokenRecord>>,
}

impl MemoryStore {
    fn seed(&self, record: TokenRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn count_for(&self, symbol: &Symbol) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.symbol == symbol)
            .count()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn latest_for(&self, symbol: &Symbol) -> Result<Option<TokenRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| &r.symbol == symbol)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_by_id(&self, id: &str, patch: RecordPatch) -> Result<TokenRecord> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))?;
        patch.apply_to(record);
        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<TokenRecord>> {
        let mut records = self.records.lock().unwrap();
        let position = records.iter().position(|r| r.id == id);
        Ok(position.map(|i| records.remove(i)))
    }

    async fn list_latest_per_symbol(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<Paginated<TokenRecord>> {
        let records = self.records.lock().unwrap();
        let mut current: HashMap<Symbol, TokenRecord> = HashMap::new();
        for record in records.iter() {
            let entry = current.entry(record.symbol.clone());
            entry
                .and_modify(|existing| {
                    if record.created_at > existing.created_at {
                        *existing = record.clone();
                    }
                })
                .or_insert_with(|| record.clone());
        }
        let mut items: Vec<TokenRecord> = current.into_values().collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let total = items.len() as i64;
        let start = ((page - 1) * page_size).max(0) as usize;
        let items = items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();
        Ok(Paginated::new(items, total, page, page_size))
    }

    async fn history_for(
        &self,
        symbol: &Symbol,
        page: i64,
        page_size: i64,
    ) -> Result<Paginated<TokenRecord>> {
        let records = self.records.lock().unwrap();
        let mut items: Vec<TokenRecord> = records
            .iter()
            .filter(|r| &r.symbol == symbol)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as i64;
        let start = ((page - 1) * page_size).max(0) as usize;
        let items = items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();
        Ok(Paginated::new(items, total, page, page_size))
    }

    async fn upsert_for_day(&self, record: TokenRecord, day: Day) -> Result<TokenRecord> {
        let existing = self.latest_for(&record.symbol).await?;
        match existing {
            Some(current) if Day::of(current.created_at) == day => {
                self.update_by_id(&current.id, record.as_patch()).await
            }
            _ => self.insert(record).await,
        }
    }
}

// =============================================================================
// Counting mock providers
// =============================================================================

struct MockMarket {
    search_results: Vec<CoinSummary>,
    search_fails: bool,
    contract_address: Option<String>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    quote_calls: AtomicUsize,
}

impl MockMarket {
    fn for_coin(id: &str, name: &str, symbol: &str, contract: Option<&str>) -> Self {
        Self {
            search_results: vec![CoinSummary {
                id: id.to_string(),
                name: name.to_string(),
                symbol: symbol.to_string(),
            }],
            search_fails: false,
            contract_address: contract.map(|c| c.to_string()),
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            quote_calls: AtomicUsize::new(0),
        }
    }

    fn empty() -> Self {
        Self {
            search_results: vec![],
            search_fails: false,
            contract_address: None,
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            quote_calls: AtomicUsize::new(0),
        }
    }

    fn failing_search() -> Self {
        let mut market = Self::empty();
        market.search_fails = true;
        market
    }

    fn adapter_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
            + self.detail_calls.load(Ordering::SeqCst)
            + self.quote_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for MockMarket {
    fn id(&self) -> &'static str {
        "MOCK_MARKET"
    }

    async fn search(&self, _query: &str) -> std::result::Result<Vec<CoinSummary>, FetchError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.search_fails {
            return Err(FetchError::Timeout {
                provider: "MOCK_MARKET".to_string(),
            });
        }
        Ok(self.search_results.clone())
    }

    async fn detail(&self, coin_id: &str) -> std::result::Result<CoinProfile, FetchError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let mut profile = CoinProfile {
            id: coin_id.to_string(),
            ..Default::default()
        };
        if let Some(address) = &self.contract_address {
            profile.detail_platforms.insert(
                "ethereum".to_string(),
                PlatformDetail {
                    decimal_place: Some(18),
                    contract_address: Some(address.clone()),
                },
            );
        }
        Ok(profile)
    }

    async fn quote(&self, _coin_id: &str) -> std::result::Result<Option<PriceSnapshot>, FetchError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(PriceSnapshot {
            usd: Some(100.0),
            usd_market_cap: Some(1_000_000.0),
            ..Default::default()
        }))
    }
}

#[derive(Default)]
struct MockTvl {
    protocol_calls: AtomicUsize,
    chain_calls: AtomicUsize,
}

#[async_trait]
impl ProtocolTvlProvider for MockTvl {
    fn id(&self) -> &'static str {
        "MOCK_TVL"
    }

    async fn list_protocols(&self) -> std::result::Result<Vec<Protocol>, FetchError> {
        self.protocol_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Protocol {
            id: "mock".to_string(),
            name: "Mock Protocol".to_string(),
            symbol: Some("MOCK".to_string()),
            tvl: Some(42.0),
            chains: vec!["Ethereum".to_string()],
            category: None,
        }])
    }
}

#[async_trait]
impl ChainTvlProvider for MockTvl {
    fn id(&self) -> &'static str {
        "MOCK_TVL"
    }

    async fn list_chains(&self) -> std::result::Result<Vec<ChainTvl>, FetchError> {
        self.chain_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ChainTvl {
            name: "Ethereum".to_string(),
            tvl: Some(60_000_000_000.0),
        }])
    }
}

#[derive(Default)]
struct MockMetadata {
    calls: AtomicUsize,
}

#[async_trait]
impl ProjectMetadataProvider for MockMetadata {
    fn id(&self) -> &'static str {
        "MOCK_METADATA"
    }

    async fn by_contract(
        &self,
        _address: &str,
    ) -> std::result::Result<Option<ProjectMetadata>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(ProjectMetadata {
            project_name: "Mock Project".to_string(),
            ..Default::default()
        }))
    }

    async fn by_symbol(
        &self,
        _symbol: &str,
    ) -> std::result::Result<Option<ProjectMetadata>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }

    async fn by_name(
        &self,
        _name: &str,
    ) -> std::result::Result<Option<ProjectMetadata>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

#[derive(Default)]
struct MockHolders {
    fails: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl HolderProvider for MockHolders {
    fn id(&self) -> &'static str {
        "MOCK_HOLDERS"
    }

    async fn list_holders(
        &self,
        contract_address: &str,
        chain_id: i64,
    ) -> std::result::Result<HolderPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fails {
            return Err(FetchError::Timeout {
                provider: "MOCK_HOLDERS".to_string(),
            });
        }
        Ok(HolderPage {
            token_address: Some(contract_address.to_string()),
            chain_id: Some(chain_id),
            holders: vec![coinlens_providers::Holder {
                wallet_address: "0xwhale".to_string(),
                balance: "1000".to_string(),
                first_acquired: None,
                has_initiated_transfer: None,
            }],
            next_offset: None,
        })
    }
}

// =============================================================================
// Harness
// =============================================================================

struct Harness {
    store: Arc<MemoryStore>,
    market: Arc<MockMarket>,
    tvl: Arc<MockTvl>,
    metadata: Arc<MockMetadata>,
    holders: Arc<MockHolders>,
    service: TokenService<MemoryStore>,
}

fn harness(market: MockMarket, holders: MockHolders) -> Harness {
    let store = Arc::new(MemoryStore::default());
    let market = Arc::new(market);
    let tvl = Arc::new(MockTvl::default());
    let metadata = Arc::new(MockMetadata::default());
    let holders = Arc::new(holders);

    let service = TokenService::new(
        store.clone(),
        market.clone(),
        tvl.clone(),
        tvl.clone(),
        metadata.clone(),
        holders.clone(),
    );

    Harness {
        store,
        market,
        tvl,
        metadata,
        holders,
        service,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_same_day_second_call_is_a_cache_hit() {
    let h = harness(
        MockMarket::for_coin("uniswap", "Uniswap", "UNI", Some("0x1f98")),
        MockHolders::default(),
    );

    let first = h.service.get_or_refresh("uni").await.unwrap();
    let calls_after_first = h.market.adapter_calls();
    assert!(calls_after_first > 0);

    let second = h.service.get_or_refresh("UNI").await.unwrap();

    // No adapter ran for the cached call and the record is the same one.
    assert_eq!(h.market.adapter_calls(), calls_after_first);
    assert_eq!(h.tvl.protocol_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.holders.calls.load(Ordering::SeqCst), 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
}

#[tokio::test]
async fn test_stale_record_is_refreshed_and_history_kept() {
    let h = harness(
        MockMarket::for_coin("bitcoin", "Bitcoin", "BTC", None),
        MockHolders::default(),
    );

    // Seed a record created yesterday.
    let yesterday = Utc::now() - Duration::days(1);
    let stale = TokenRecord {
        id: "stale-id".to_string(),
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
        created_at: yesterday,
        updated_at: yesterday,
    };
    h.store.seed(stale);

    let refreshed = h.service.get_or_refresh("BTC").await.unwrap();

    assert_ne!(refreshed.id, "stale-id");
    assert_eq!(h.store.count_for(&Symbol::new("BTC")), 2);

    // Both records show up in history; only the fresh one is current.
    let history = h.service.history("BTC", 1, 10).await.unwrap();
    assert_eq!(history.total, 2);
    let listing = h.service.list(1, 10).await.unwrap();
    assert_eq!(listing.total, 1);
    assert_eq!(listing.items[0].id, refreshed.id);
}

#[tokio::test]
async fn test_empty_search_is_symbol_not_found() {
    let h = harness(MockMarket::empty(), MockHolders::default());

    let err = h.service.get_or_refresh("NOPE").await.unwrap_err();
    assert!(matches!(err, Error::SymbolNotFound(s) if s == "NOPE"));

    // Nothing past the search ran and nothing was stored.
    assert_eq!(h.market.detail_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.store.count_for(&Symbol::new("NOPE")), 0);
}

#[tokio::test]
async fn test_failed_search_surfaces_fetch_error() {
    let h = harness(MockMarket::failing_search(), MockHolders::default());

    let err = h.service.get_or_refresh("BTC").await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
}

#[tokio::test]
async fn test_holder_failure_degrades_but_succeeds() {
    let h = harness(
        MockMarket::for_coin("uniswap", "Uniswap", "UNI", Some("0x1f98")),
        MockHolders {
            fails: true,
            ..Default::default()
        },
    );

    let record = h.service.get_or_refresh("UNI").await.unwrap();

    // Holder section empty, everything else populated.
    assert!(record.holders.is_empty());
    assert!(record.price.is_some());
    assert!(record.profile.is_some());
    assert!(record.metadata.is_some());
    assert_eq!(record.chain_tvls.len(), 1);
    assert_eq!(h.holders.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_no_contract_address_skips_holder_lookup() {
    let h = harness(
        MockMarket::for_coin("some-coin", "Some Coin", "SOME", None),
        MockHolders::default(),
    );

    let record = h.service.get_or_refresh("SOME").await.unwrap();

    assert!(record.contract_address.is_none());
    assert!(record.holders.is_empty());
    assert_eq!(h.holders.calls.load(Ordering::SeqCst), 0);
    // Contract and symbol strategies did not apply; only the name search ran.
    assert_eq!(h.metadata.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delete_returns_record() {
    let h = harness(
        MockMarket::for_coin("uniswap", "Uniswap", "UNI", Some("0x1f98")),
        MockHolders::default(),
    );

    let record = h.service.get_or_refresh("UNI").await.unwrap();
    let deleted = h.service.delete(&record.id).await.unwrap();
    assert_eq!(deleted.map(|r| r.id), Some(record.id));
    assert!(h.service.delete("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_symbol_is_rejected() {
    let h = harness(MockMarket::empty(), MockHolders::default());
    let err = h.service.get_or_refresh("   ").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(h.market.search_calls.load(Ordering::SeqCst), 0);
}
