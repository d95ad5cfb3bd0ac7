//! Record storage trait.
//!
//! This trait abstracts the persistence layer for token records, allowing
//! different storage backends to be used interchangeably. Implementations
//! convert their storage-specific errors into the database-agnostic
//! [`DatabaseError`](crate::errors::DatabaseError) variants.
//!
//! # Design Notes
//!
//! - Records are append-only across days; same-day refreshes mutate in place.
//! - `upsert_for_day` is the only write path the freshness engine uses: the
//!   same-day re-check and the insert-or-update must execute inside one
//!   store transaction, so concurrent refreshes for the same symbol cannot
//!   produce two same-day records or a lost update.
//! - "Current" per symbol is the record with the greatest `created_at`;
//!   implementations maintain this as an explicit index rather than
//!   recomputing a group-by on every listing.

use async_trait::async_trait;

use super::model::{Paginated, RecordPatch, TokenRecord};
use super::types::{Day, Symbol};
use crate::errors::Result;

/// Storage interface for token records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The most-recently-created record for a symbol, if any.
    async fn latest_for(&self, symbol: &Symbol) -> Result<Option<TokenRecord>>;

    /// Insert a new record.
    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord>;

    /// Overwrite the mutable fields of an existing record.
    ///
    /// Returns the updated record. Fails with `DatabaseError::NotFound`
    /// when no record has the given id.
    async fn update_by_id(&self, id: &str, patch: RecordPatch) -> Result<TokenRecord>;

    /// Delete a record by id, returning it when it existed.
    async fn delete_by_id(&self, id: &str) -> Result<Option<TokenRecord>>;

    /// One page of current records, one per distinct symbol, ordered by
    /// `updated_at` descending. `page` is 1-based.
    async fn list_latest_per_symbol(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<Paginated<TokenRecord>>;

    /// One page of the full history for a symbol, newest first.
    async fn history_for(
        &self,
        symbol: &Symbol,
        page: i64,
        page_size: i64,
    ) -> Result<Paginated<TokenRecord>>;

    /// Atomic conditional write keyed on (symbol, day).
    ///
    /// Inside one transaction: when the current record for the symbol was
    /// created on `day`, its mutable fields are overwritten (identity and
    /// `created_at` kept); otherwise the record is inserted as a new row.
    /// Returns the stored record either way.
    async fn upsert_for_day(&self, record: TokenRecord, day: Day) -> Result<TokenRecord>;
}
