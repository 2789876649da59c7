//! SQLite-backed project store
//!
//! This is the data-access layer: one method per use case, each opening its
//! own connection, executing a single parameterized statement, and mapping
//! rows back to entity records. There is no pooling - the tool is a
//! single-operator console program and every call scopes its connection to
//! the call, so connections are released on every exit path.

mod queries;
mod schema;
mod types;

pub use types::ProjectSummary;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

/// Schema version recorded in the database on first initialization
const SCHEMA_VERSION: i32 = 1;

/// Errors surfaced by the store
///
/// Callers can always tell a store failure apart from a not-found result:
/// lookups return `Ok(None)` and mutations return `Ok(0)` for absent rows,
/// and `Err(StoreError)` only when the database itself misbehaves.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database at {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("database query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("database was created by an incompatible version (schema v{found}, expected v{expected})")]
    SchemaVersion { found: i32, expected: i32 },

    #[error("failed to create database directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Handle to the project database
///
/// Holds only the database path. `open` initializes the schema once;
/// every operation then acquires its own short-lived connection.
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Open the store, creating the database and schema if needed
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let store = Self {
            path: path.to_path_buf(),
        };

        let conn = store.acquire()?;
        store.init_schema(&conn)?;
        store.check_schema_version(&conn)?;

        Ok(store)
    }

    /// Path to the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a fresh connection for a single operation
    ///
    /// The connection is dropped (and released) when it goes out of scope
    /// in the calling operation, errors included.
    fn acquire(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path).map_err(|source| StoreError::Open {
            path: self.path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        Ok(conn)
    }

    /// Verify the recorded schema version
    ///
    /// The database is the source of truth, so a mismatch is an error,
    /// never a destructive rebuild.
    fn check_schema_version(&self, conn: &Connection) -> Result<(), StoreError> {
        let found = match conn.query_row(
            "SELECT version FROM schema_version LIMIT 1",
            [],
            |row| row.get::<_, i32>(0),
        ) {
            Ok(version) => version,
            // A freshly initialized table has no row yet
            Err(rusqlite::Error::QueryReturnedNoRows) => SCHEMA_VERSION,
            Err(e) => return Err(StoreError::Query(e)),
        };

        if found != SCHEMA_VERSION {
            return Err(StoreError::SchemaVersion {
                found,
                expected: SCHEMA_VERSION,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_version_mismatch_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("poised.db");
        ProjectStore::open(&path).unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute("UPDATE schema_version SET version = 99", [])
            .unwrap();
        drop(conn);

        let err = ProjectStore::open(&path).err().unwrap();
        assert!(matches!(
            err,
            StoreError::SchemaVersion {
                found: 99,
                expected: SCHEMA_VERSION,
            }
        ));
    }

    #[test]
    fn test_version_query_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        let store = ProjectStore::open(&tmp.path().join("poised.db")).unwrap();

        // A broken version table must surface as a store error, never be
        // mistaken for a matching version.
        let conn = store.acquire().unwrap();
        conn.execute_batch("ALTER TABLE schema_version RENAME TO schema_version_old;")
            .unwrap();
        let err = store.check_schema_version(&conn).unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }
}
