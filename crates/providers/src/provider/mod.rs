//! Provider adapters and capability traits.

pub mod coingecko;
pub mod defillama;
pub mod dune;
pub mod rootdata;
pub mod traits;

pub use traits::{
    ChainTvlProvider, HolderProvider, MarketDataProvider, ProjectMetadataProvider,
    ProtocolTvlProvider,
};
