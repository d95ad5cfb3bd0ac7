//! Coinlens Provider Crate
//!
//! This crate wraps the external data sources a token record is assembled
//! from, behind transport-agnostic capability traits.
//!
//! # Overview
//!
//! One adapter per source, each isolating its own failures:
//! - CoinGecko: symbol search, coin profile, spot price
//! - DefiLlama: protocol TVL list and chain TVL list
//! - RootData: project metadata (tags, investors, similar projects)
//! - Dune Sim: on-chain holder distribution
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Caller       | --> | MetadataLookup   |  (what we know so far)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | MetadataResolver |  (chain of responsibility)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (CoinGecko, RootData, ...)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   Raw payload    |  (CoinProfile, HolderPage, ...)
//!                          +------------------+
//! ```
//!
//! # Failure model
//!
//! Adapters never retry and never block past their 10 second timeout.
//! An empty result (`Ok(None)`, empty vec) is a valid negative, distinct
//! from a [`FetchError`].

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

pub use errors::FetchError;

pub use models::{
    ChainTvl, CoinLinks, CoinProfile, CoinSummary, Description, Holder, HolderPage,
    PlatformDetail, PriceSnapshot, ProjectMetadata, Protocol, SupplyFigures,
};

pub use provider::coingecko::CoinGeckoProvider;
pub use provider::defillama::DefiLlamaProvider;
pub use provider::dune::DuneSimProvider;
pub use provider::rootdata::RootDataProvider;
pub use provider::{
    ChainTvlProvider, HolderProvider, MarketDataProvider, ProjectMetadataProvider,
    ProtocolTvlProvider,
};

pub use resolver::{
    native_symbol, MetadataLookup, MetadataResolver, MetadataStrategy, ResolutionSource,
    ResolvedMetadata,
};
