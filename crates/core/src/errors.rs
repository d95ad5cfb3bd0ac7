//! Core error types for the token record pipeline.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer. Provider failures that degrade a record are NOT represented here;
//! they are handled locally at the fan-out and only logged. A `FetchError`
//! surfaces as a top-level error only when the initial symbol search itself
//! cannot be performed.

use thiserror::Error;

use coinlens_providers::FetchError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for token record operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    /// The symbol search returned nothing; no record was built.
    #[error("No token found for symbol: {0}")]
    SymbolNotFound(String),

    /// The symbol search itself could not be performed.
    #[error("Provider fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Input validation failed: {0}")]
    Validation(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A read query failed to execute.
    #[error("Store read failed: {0}")]
    ReadFailed(String),

    /// A write operation failed to execute.
    #[error("Store write failed: {0}")]
    WriteFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
