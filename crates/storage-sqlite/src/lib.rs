//! SQLite storage implementation for CoinLens.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the [`RecordStore`](coinlens_core::tokens::RecordStore) trait defined
//! in `coinlens-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The token record repository
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with the storage trait.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! All writes go through a single-writer actor; the `tokens` table is
//! append-only across days while the `current_records` table indexes the
//! newest record per symbol.

pub mod db;
pub mod errors;
pub mod schema;
pub mod tokens;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use tokens::TokenRepository;

// Re-export from coinlens-core for convenience
pub use coinlens_core::errors::{DatabaseError, Error, Result};
