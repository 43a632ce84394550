//! SQLite-backed [`DataStore`].

use std::path::Path;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};

use super::{DataStore, Record, StoreResult, StoreValue, SCHEMA_SQL, SEED_SQL};
use crate::sql::{CompiledQuery, Dialect, ParamValue};

impl ToSql for ParamValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            ParamValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            ParamValue::Integer(n) => ToSqlOutput::Borrowed(ValueRef::Integer(*n)),
            ParamValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
        })
    }
}

/// A single SQLite connection, opened for one request.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database file.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the hospital tables if they don't exist.
    pub fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Load the demo data set. Idempotent: existing ids are left alone.
    pub fn seed(&self) -> StoreResult<()> {
        self.conn.execute_batch(SEED_SQL)?;
        Ok(())
    }

    /// Access the underlying connection, e.g. to insert fixtures.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn run(&self, query: &CompiledQuery, limit: Option<usize>) -> StoreResult<Vec<Record>> {
        tracing::debug!(sql = %query.sql, params = query.params.len(), "executing query");

        let mut stmt = self.conn.prepare(&query.sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut rows = stmt.query(params_from_iter(query.params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Record::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let value = match row.get_ref(i)? {
                    ValueRef::Null => StoreValue::Null,
                    ValueRef::Integer(n) => StoreValue::Integer(n),
                    ValueRef::Real(f) => StoreValue::Real(f),
                    ValueRef::Text(t) => StoreValue::Text(String::from_utf8_lossy(t).into_owned()),
                    ValueRef::Blob(b) => StoreValue::Blob(b.to_vec()),
                };
                record.insert(name.clone(), value);
            }
            out.push(record);
            if limit.is_some_and(|l| out.len() >= l) {
                break;
            }
        }
        Ok(out)
    }
}

impl DataStore for SqliteStore {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn fetch_all(&self, query: &CompiledQuery) -> StoreResult<Vec<Record>> {
        self.run(query, None)
    }

    fn fetch_one(&self, query: &CompiledQuery) -> StoreResult<Option<Record>> {
        Ok(self.run(query, Some(1))?.into_iter().next())
    }
}
