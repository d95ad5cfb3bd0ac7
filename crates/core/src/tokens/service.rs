//! Token record service - the freshness cache and upsert engine.
//!
//! One query for a symbol walks the states:
//! `CHECK_CACHE -> {CACHE_HIT | FETCH_SOURCES} -> RECONCILE -> UPSERT`.
//!
//! A stored record whose creation day is today is served directly with no
//! provider calls. Otherwise the adapters are fanned out: search first
//! (its failure or an empty result aborts), then detail, quote, protocol
//! and chain listings run concurrently; metadata resolution and the holder
//! lookup follow, since both need the resolved contract address. Every
//! adapter failure past the search degrades its own section and is logged;
//! only store failures abort.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};

use coinlens_providers::{
    ChainTvlProvider, FetchError, HolderPage, HolderProvider, MarketDataProvider, MetadataLookup,
    MetadataResolver, ProjectMetadataProvider, ProtocolTvlProvider,
};

use super::model::{Paginated, TokenRecord};
use super::reconciler::{self, RawSections};
use super::store::RecordStore;
use super::types::{Day, Symbol};
use crate::errors::{Error, Result};

/// Chain queried for holder distributions (Ethereum mainnet).
pub const DEFAULT_CHAIN_ID: i64 = 1;

/// Service over a record store and the five provider capabilities.
pub struct TokenService<S: RecordStore> {
    store: Arc<S>,
    market: Arc<dyn MarketDataProvider>,
    protocol_tvl: Arc<dyn ProtocolTvlProvider>,
    chain_tvl: Arc<dyn ChainTvlProvider>,
    metadata: Arc<dyn ProjectMetadataProvider>,
    holders: Arc<dyn HolderProvider>,
    resolver: MetadataResolver,
}

impl<S: RecordStore> TokenService<S> {
    pub fn new(
        store: Arc<S>,
        market: Arc<dyn MarketDataProvider>,
        protocol_tvl: Arc<dyn ProtocolTvlProvider>,
        chain_tvl: Arc<dyn ChainTvlProvider>,
        metadata: Arc<dyn ProjectMetadataProvider>,
        holders: Arc<dyn HolderProvider>,
    ) -> Self {
        Self {
            store,
            market,
            protocol_tvl,
            chain_tvl,
            metadata,
            holders,
            resolver: MetadataResolver::new(),
        }
    }

    /// The current record for a symbol, refreshed when stale.
    ///
    /// Serves the stored record when one was created today; otherwise
    /// re-queries every source, reconciles, and upserts for today's day
    /// bucket. A degraded record (missing sections) is a success.
    pub async fn get_or_refresh(&self, symbol: &str) -> Result<TokenRecord> {
        let symbol = Symbol::new(symbol);
        if symbol.is_empty() {
            return Err(Error::Validation("symbol must not be empty".to_string()));
        }

        if let Some(record) = self.store.latest_for(&symbol).await? {
            if Day::of(record.created_at) == Day::today() {
                debug!(
                    "Serving cached record for {} (created {})",
                    symbol, record.created_at
                );
                return Ok(record);
            }
            debug!("Stored record for {} is stale, refreshing", symbol);
        }

        let record = self.fetch_and_reconcile(&symbol).await?;
        self.store.upsert_for_day(record, Day::today()).await
    }

    /// One page of current records, one per symbol, ordered by
    /// `updated_at` descending.
    pub async fn list(&self, page: i64, page_size: i64) -> Result<Paginated<TokenRecord>> {
        self.store.list_latest_per_symbol(page, page_size).await
    }

    /// One page of the record history for a symbol, newest first.
    pub async fn history(
        &self,
        symbol: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Paginated<TokenRecord>> {
        self.store
            .history_for(&Symbol::new(symbol), page, page_size)
            .await
    }

    /// Delete a record by id, returning it when it existed.
    pub async fn delete(&self, id: &str) -> Result<Option<TokenRecord>> {
        self.store.delete_by_id(id).await
    }

    /// Fan out to every source and reconcile the results.
    async fn fetch_and_reconcile(&self, symbol: &Symbol) -> Result<TokenRecord> {
        // Search failure aborts: without a coin id nothing can be built.
        let hits = self.market.search(symbol.as_str()).await?;
        let Some(summary) = hits.into_iter().next() else {
            return Err(Error::SymbolNotFound(symbol.to_string()));
        };

        debug!("Resolved {} to coin id {}", symbol, summary.id);

        let (profile, quote, protocols, chain_tvls) = tokio::join!(
            self.market.detail(&summary.id),
            self.market.quote(&summary.id),
            self.protocol_tvl.list_protocols(),
            self.chain_tvl.list_chains(),
        );

        let profile = degraded("profile", self.market.id(), profile);
        let quote = degraded("quote", self.market.id(), quote).flatten();
        let protocols =
            degraded("protocols", self.protocol_tvl.id(), protocols).unwrap_or_default();
        let chain_tvls = degraded("chains", self.chain_tvl.id(), chain_tvls).unwrap_or_default();

        let contract_address = profile.as_ref().and_then(reconciler::resolve_contract_address);

        let lookup = MetadataLookup {
            coin_id: summary.id.clone(),
            symbol: symbol.to_string(),
            name: summary.name.clone(),
            contract_address: contract_address.clone(),
        };

        let (resolved, holders) = tokio::join!(
            self.resolver.resolve(self.metadata.as_ref(), &lookup),
            self.fetch_holders(contract_address.as_deref()),
        );

        let sections = RawSections {
            summary,
            profile,
            quote,
            protocols,
            chain_tvls,
            metadata: resolved.map(|r| r.metadata),
            holders,
        };

        Ok(reconciler::reconcile(sections, Utc::now()))
    }

    /// Holder lookup, skipped (valid empty) without a contract address.
    async fn fetch_holders(&self, contract_address: Option<&str>) -> Option<HolderPage> {
        let address = contract_address?;
        match self.holders.list_holders(address, DEFAULT_CHAIN_ID).await {
            Ok(page) => Some(page),
            Err(e) => {
                warn!(
                    "holders adapter failed ({}), section left empty: {}",
                    self.holders.id(),
                    e
                );
                None
            }
        }
    }
}

/// Collapse an adapter failure into an absent section, logged.
fn degraded<T>(
    section: &str,
    provider: &str,
    result: std::result::Result<T, FetchError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} adapter failed ({}), section left empty: {}", section, provider, e);
            None
        }
    }
}
