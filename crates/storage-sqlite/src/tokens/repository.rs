//! SQLite repository for token records.
//!
//! Reads borrow pooled connections; every mutation runs as one job on the
//! single-writer actor, so the day-bucketed upsert's read-then-write is a
//! single transaction. The `current_records` index table always points at
//! the row with the greatest `created_at` per symbol and is repointed in
//! the same transaction as the mutation that could move it.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use log::debug;

use coinlens_core::tokens::{Day, Paginated, RecordPatch, RecordStore, Symbol, TokenRecord};
use coinlens_core::errors::{DatabaseError, Error, Result};

use super::model::{CurrentRecordDB, TokenRecordDB, TokenRecordPatchDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::current_records::dsl as current_dsl;
use crate::schema::tokens::dsl as tokens_dsl;

pub struct TokenRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TokenRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

// RFC 3339 strings in a fixed offset compare lexicographically in time
// order, so `ORDER BY created_at` on the text column is chronological.
fn load_latest_row(
    conn: &mut SqliteConnection,
    symbol: &str,
) -> std::result::Result<Option<TokenRecordDB>, DieselError> {
    tokens_dsl::tokens
        .filter(tokens_dsl::symbol.eq(symbol))
        .order(tokens_dsl::created_at.desc())
        .first::<TokenRecordDB>(conn)
        .optional()
}

/// Repoint the index row for a symbol at its latest surviving record, or
/// remove the row when none is left. Runs inside the caller's transaction.
fn repoint_index(
    conn: &mut SqliteConnection,
    symbol: &str,
) -> std::result::Result<(), DieselError> {
    match load_latest_row(conn, symbol)? {
        Some(row) => {
            diesel::replace_into(current_dsl::current_records)
                .values(CurrentRecordDB {
                    symbol: symbol.to_string(),
                    record_id: row.id,
                    updated_at: row.updated_at,
                })
                .execute(conn)?;
        }
        None => {
            diesel::delete(current_dsl::current_records.filter(current_dsl::symbol.eq(symbol)))
                .execute(conn)?;
        }
    }
    Ok(())
}

fn clamp_page(page: i64, page_size: i64) -> (i64, i64) {
    (page.max(1), page_size.max(1))
}

#[async_trait]
impl RecordStore for TokenRepository {
    async fn latest_for(&self, symbol: &Symbol) -> Result<Option<TokenRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let row = load_latest_row(&mut conn, symbol.as_str()).into_core_read()?;
        Ok(row.map(TokenRecord::from))
    }

    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord> {
        let row = TokenRecordDB::from(&record);
        let symbol = record.symbol.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(tokens_dsl::tokens)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::QueryFailed)?;
                repoint_index(conn, &symbol).map_err(StorageError::QueryFailed)?;
                Ok(())
            })
            .await?;

        Ok(record)
    }

    async fn update_by_id(&self, id: &str, patch: RecordPatch) -> Result<TokenRecord> {
        let id = id.to_string();
        let patch_row = TokenRecordPatchDB::from(&patch);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TokenRecord> {
                let updated = diesel::update(tokens_dsl::tokens.find(&id))
                    .set(&patch_row)
                    .execute(conn)
                    .map_err(StorageError::QueryFailed)?;
                if updated == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(id.clone())));
                }

                let row = tokens_dsl::tokens
                    .find(&id)
                    .first::<TokenRecordDB>(conn)
                    .map_err(StorageError::QueryFailed)?;
                repoint_index(conn, &row.symbol).map_err(StorageError::QueryFailed)?;
                Ok(TokenRecord::from(row))
            })
            .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<TokenRecord>> {
        let id = id.to_string();

        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Option<TokenRecord>> {
                    let row = tokens_dsl::tokens
                        .find(&id)
                        .first::<TokenRecordDB>(conn)
                        .optional()
                        .map_err(StorageError::QueryFailed)?;

                    let Some(row) = row else {
                        return Ok(None);
                    };

                    // Index row goes first so the foreign key holds.
                    diesel::delete(
                        current_dsl::current_records.filter(current_dsl::record_id.eq(&id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::QueryFailed)?;
                    diesel::delete(tokens_dsl::tokens.find(&id))
                        .execute(conn)
                        .map_err(StorageError::QueryFailed)?;
                    repoint_index(conn, &row.symbol).map_err(StorageError::QueryFailed)?;

                    Ok(Some(TokenRecord::from(row)))
                },
            )
            .await
    }

    async fn list_latest_per_symbol(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<Paginated<TokenRecord>> {
        let (page, page_size) = clamp_page(page, page_size);
        let mut conn = get_connection(&self.pool)?;

        let total: i64 = current_dsl::current_records
            .count()
            .get_result(&mut conn)
            .into_core_read()?;

        let rows: Vec<TokenRecordDB> = current_dsl::current_records
            .inner_join(tokens_dsl::tokens)
            .order(current_dsl::updated_at.desc())
            .limit(page_size)
            .offset((page - 1) * page_size)
            .select(TokenRecordDB::as_select())
            .load(&mut conn)
            .into_core_read()?;

        Ok(Paginated::new(
            rows.into_iter().map(TokenRecord::from).collect(),
            total,
            page,
            page_size,
        ))
    }

    async fn history_for(
        &self,
        symbol: &Symbol,
        page: i64,
        page_size: i64,
    ) -> Result<Paginated<TokenRecord>> {
        let (page, page_size) = clamp_page(page, page_size);
        let mut conn = get_connection(&self.pool)?;

        let total: i64 = tokens_dsl::tokens
            .filter(tokens_dsl::symbol.eq(symbol.as_str()))
            .count()
            .get_result(&mut conn)
            .into_core_read()?;

        let rows: Vec<TokenRecordDB> = tokens_dsl::tokens
            .filter(tokens_dsl::symbol.eq(symbol.as_str()))
            .order(tokens_dsl::created_at.desc())
            .limit(page_size)
            .offset((page - 1) * page_size)
            .load(&mut conn)
            .into_core_read()?;

        Ok(Paginated::new(
            rows.into_iter().map(TokenRecord::from).collect(),
            total,
            page,
            page_size,
        ))
    }

    async fn upsert_for_day(&self, record: TokenRecord, day: Day) -> Result<TokenRecord> {
        let symbol = record.symbol.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TokenRecord> {
                let existing = load_latest_row(conn, &symbol)
                    .map_err(StorageError::QueryFailed)?
                    .map(TokenRecord::from);

                let stored = match existing {
                    Some(mut current) if Day::of(current.created_at) == day => {
                        debug!("Same-day record for {}, overwriting in place", symbol);
                        let patch = record.as_patch();
                        let patch_row = TokenRecordPatchDB::from(&patch);
                        diesel::update(tokens_dsl::tokens.find(&current.id))
                            .set(&patch_row)
                            .execute(conn)
                            .map_err(StorageError::QueryFailed)?;
                        patch.apply_to(&mut current);
                        current
                    }
                    _ => {
                        debug!("No record for {} on {}, inserting", symbol, day);
                        let row = TokenRecordDB::from(&record);
                        diesel::insert_into(tokens_dsl::tokens)
                            .values(&row)
                            .execute(conn)
                            .map_err(StorageError::QueryFailed)?;
                        record
                    }
                };

                repoint_index(conn, &symbol).map_err(StorageError::QueryFailed)?;
                Ok(stored)
            })
            .await
    }
}
