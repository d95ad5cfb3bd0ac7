//! SQLite persistence for token records.

pub mod model;
pub mod repository;

pub use model::{CurrentRecordDB, TokenRecordDB, TokenRecordPatchDB};
pub use repository::TokenRepository;
