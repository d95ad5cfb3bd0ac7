//! Capability traits for the external data sources.
//!
//! One trait per capability the record build consumes. Implementations must
//! not retry internally and must bound each call with a timeout, so that a
//! slow source degrades its own section only.
//!
//! Empty results are valid negatives (`Ok(None)`, empty vec), not errors.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{
    ChainTvl, CoinProfile, CoinSummary, HolderPage, PriceSnapshot, ProjectMetadata, Protocol,
};

/// Spot price / market data source (search, profile, quote).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Search coins matching the query. Empty vec means no match.
    async fn search(&self, query: &str) -> Result<Vec<CoinSummary>, FetchError>;

    /// Fetch the full profile for a coin id.
    async fn detail(&self, coin_id: &str) -> Result<CoinProfile, FetchError>;

    /// Fetch the current spot quote for a coin id.
    /// `None` means the provider has no quote for this id.
    async fn quote(&self, coin_id: &str) -> Result<Option<PriceSnapshot>, FetchError>;
}

/// Provider-wide protocol TVL listing.
#[async_trait]
pub trait ProtocolTvlProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// List every protocol the provider tracks.
    async fn list_protocols(&self) -> Result<Vec<Protocol>, FetchError>;
}

/// Provider-wide chain TVL listing.
#[async_trait]
pub trait ChainTvlProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// List locked value per chain.
    async fn list_chains(&self) -> Result<Vec<ChainTvl>, FetchError>;
}

/// Project metadata source with three lookup modes.
///
/// Callers should go through the fallback resolver rather than invoking
/// these directly; each mode returns `None` for a valid no-match.
#[async_trait]
pub trait ProjectMetadataProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// Lookup by contract address.
    async fn by_contract(&self, address: &str) -> Result<Option<ProjectMetadata>, FetchError>;

    /// Lookup by trading symbol.
    async fn by_symbol(&self, symbol: &str) -> Result<Option<ProjectMetadata>, FetchError>;

    /// Lookup by free-text project name.
    async fn by_name(&self, name: &str) -> Result<Option<ProjectMetadata>, FetchError>;
}

/// On-chain holder distribution source.
#[async_trait]
pub trait HolderProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// List holders of a token contract on a chain. The returned page
    /// carries a continuation cursor when more holders exist.
    async fn list_holders(
        &self,
        contract_address: &str,
        chain_id: i64,
    ) -> Result<HolderPage, FetchError>;
}
