//! Counter schema
//!
//! There is a single table and no versioned migrations: the DDL is
//! create-if-absent and safe to run on every start.

use rusqlite::Connection;

use crate::Result;

pub(crate) const COUNTERS_TABLE: &str = "counters";

/// `AUTOINCREMENT` keeps ids from being reused after the highest row is deleted.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS counters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL CHECK (length(label) > 0),
    count INTEGER NOT NULL DEFAULT 0 CHECK (count >= 0)
);
"#;

pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
