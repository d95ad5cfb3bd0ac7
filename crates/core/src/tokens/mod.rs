//! Token record domain: canonical model, reconciliation, freshness cache,
//! and the storage trait.

pub mod model;
pub mod reconciler;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod service_tests;

pub use model::{Paginated, RecordPatch, TokenRecord};
pub use reconciler::{reconcile, related_protocols, resolve_contract_address, RawSections};
pub use service::{TokenService, DEFAULT_CHAIN_ID};
pub use store::RecordStore;
pub use types::{Day, Symbol};
