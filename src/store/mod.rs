//! Data-store collaborator.
//!
//! The report engine talks to storage only through [`DataStore`]: it hands
//! over a [`CompiledQuery`] (SQL text with placeholders plus the positional
//! parameter list) and gets back loosely typed [`Record`]s. Coercion into
//! report values happens on the engine side, per column.
//!
//! # Design
//!
//! - One store per request; nothing here is shared across requests
//! - No string building: the store binds `CompiledQuery::params` verbatim
//! - The store reports the dialect it speaks so the engine renders matching
//!   placeholders

mod schema;
mod sqlite;

pub use schema::{SCHEMA_SQL, SEED_SQL};
pub use sqlite::SqliteStore;

use indexmap::IndexMap;

use crate::sql::{CompiledQuery, Dialect, QueryBuildError};

/// Errors raised by a data store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Query construction failed: {0}")]
    InvalidQuery(#[from] QueryBuildError),

    #[error("Column `{column}` could not be decoded: {reason}")]
    Decode { column: String, reason: String },

    #[error("Column `{0}` missing from result set")]
    MissingColumn(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A raw value as returned by the store, before per-column coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// One result row keyed by output column name, in SELECT order.
pub type Record = IndexMap<String, StoreValue>;

/// Parameterised-query executor.
pub trait DataStore {
    /// Dialect the store expects SQL in.
    fn dialect(&self) -> Dialect;

    /// Execute and fetch every row.
    fn fetch_all(&self, query: &CompiledQuery) -> StoreResult<Vec<Record>>;

    /// Execute and fetch the first row, if any.
    fn fetch_one(&self, query: &CompiledQuery) -> StoreResult<Option<Record>>;
}

impl<T: DataStore + ?Sized> DataStore for &T {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn fetch_all(&self, query: &CompiledQuery) -> StoreResult<Vec<Record>> {
        (**self).fetch_all(query)
    }

    fn fetch_one(&self, query: &CompiledQuery) -> StoreResult<Option<Record>> {
        (**self).fetch_one(query)
    }
}
