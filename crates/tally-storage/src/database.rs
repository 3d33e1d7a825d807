//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

use crate::error::StorageError;
use crate::schema::{ensure_schema, table_exists, COUNTERS_TABLE};
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (creating if needed) the database file and bootstrap the schema.
    ///
    /// Any failure to open the file or configure the connection is reported as
    /// [`StorageError::Open`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let conn = Connection::open(path)
            .and_then(|conn| {
                conn.pragma_update(None, "foreign_keys", "ON")?;

                // WAL keeps a crash mid-write from corrupting the main file
                let _: String = conn.pragma_update_and_check(
                    None,
                    "journal_mode",
                    "WAL",
                    |row| row.get(0),
                )?;
                Ok(conn)
            })
            .map_err(|source| StorageError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        ensure_schema(&conn)?;

        tracing::debug!(path = %path.display(), "Opened database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Open {
            path: ":memory:".into(),
            source,
        })?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Re-run the create-if-absent DDL. Existing rows are untouched.
    pub fn ensure_schema(&self) -> Result<()> {
        self.with_connection(ensure_schema)
    }

    pub fn has_counters_table(&self) -> Result<bool> {
        self.with_connection(|conn| table_exists(conn, COUNTERS_TABLE))
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Run `f` inside a transaction. The transaction is rolled back if `f` fails.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
