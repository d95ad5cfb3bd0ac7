//! Raw payload models for the provider crate.
//!
//! These are the deserialization targets for each source's JSON, kept close
//! to the wire shape. Reconciliation into the canonical record happens in
//! the core crate, not here.

mod holders;
mod market;
mod metadata;
mod tvl;

pub use holders::{Holder, HolderPage};
pub use market::{CoinLinks, CoinProfile, CoinSummary, Description, PlatformDetail, PriceSnapshot, SupplyFigures};
pub use metadata::ProjectMetadata;
pub use tvl::{ChainTvl, Protocol};
