//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap Diesel-specific errors and
//! convert them to the database-agnostic error types defined in
//! `coinlens_core`. Read and write paths convert separately so the core
//! error carries which side of the store failed.

use diesel::result::Error as DieselError;
use thiserror::Error;

use coinlens_core::errors::{DatabaseError, Error};

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// Internal to the storage layer; converted to `coinlens_core::Error`
/// before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Core error: {0}")]
    CoreError(String),
}

/// Convert core Error to StorageError (for the write actor's transaction
/// wrapper).
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::WriteFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::SerializationError(e) => Error::Database(DatabaseError::Internal(e)),
            StorageError::CoreError(e) => Error::Database(DatabaseError::Internal(e)),
        }
    }
}

/// Extension trait for converting Diesel Results to core Results.
///
/// Since we can't implement `From<DieselError> for Error` due to orphan
/// rules, this trait provides the conversion, split by read/write so the
/// resulting `DatabaseError` names the failing side.
pub trait IntoCore<T> {
    /// Convert a read-path failure.
    fn into_core_read(self) -> coinlens_core::Result<T>;

    /// Convert a write-path failure.
    fn into_core_write(self) -> coinlens_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core_read(self) -> coinlens_core::Result<T> {
        self.map_err(|e| match e {
            DieselError::NotFound => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            other => Error::Database(DatabaseError::ReadFailed(other.to_string())),
        })
    }

    fn into_core_write(self) -> coinlens_core::Result<T> {
        self.map_err(|e| match e {
            DieselError::NotFound => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            other => Error::Database(DatabaseError::WriteFailed(other.to_string())),
        })
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core_read(self) -> coinlens_core::Result<T> {
        self.map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))
    }

    fn into_core_write(self) -> coinlens_core::Result<T> {
        self.map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))
    }
}
