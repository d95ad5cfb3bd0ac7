//! Coinlens Core Crate
//!
//! Database-agnostic domain logic for the token record pipeline: the
//! canonical record model, the field reconciler, the freshness cache /
//! upsert engine, and the `RecordStore` trait the storage crate implements.
//!
//! The flow for one query:
//!
//! ```text
//! get_or_refresh(symbol)
//!   -> RecordStore::latest_for          (CHECK_CACHE)
//!   -> cached record created today?     (CACHE_HIT: return, no I/O)
//!   -> provider fan-out                 (FETCH_SOURCES, degraded on failure)
//!   -> reconcile                        (RECONCILE, pure)
//!   -> RecordStore::upsert_for_day      (UPSERT, one transaction)
//! ```

pub mod errors;
pub mod tokens;

pub use errors::{DatabaseError, Error, Result};
pub use tokens::{
    Day, Paginated, RecordPatch, RecordStore, Symbol, TokenRecord, TokenService,
};
