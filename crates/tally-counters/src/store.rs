//! Counter Store
//!
//! Durable CRUD over the `counters` table. Each operation is one statement
//! or one transaction, so a crash never leaves a half-updated counter.

use rusqlite::OptionalExtension;
use std::path::Path;

use tally_storage::Database;

use crate::counter::{normalize_label, Counter, CounterId};
use crate::error::CounterError;
use crate::Result;

const SELECT_COUNTER: &str = "SELECT id, label, count FROM counters WHERE id = ?1";

pub struct CounterStore {
    db: Database,
}

impl CounterStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the store backed by the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Database::open(path).map_err(CounterError::StorageUnavailable)?;
        Ok(Self::new(db))
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().map_err(CounterError::StorageUnavailable)?;
        Ok(Self::new(db))
    }

    /// Ensure the backing table exists. Safe to call on every start.
    pub fn initialize(&self) -> Result<()> {
        self.db
            .ensure_schema()
            .map_err(CounterError::StorageUnavailable)?;

        tracing::info!(counters = self.len()?, "Counter store initialized");

        Ok(())
    }

    /// All counters in insertion order.
    pub fn list(&self) -> Result<Vec<Counter>> {
        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT id, label, count FROM counters ORDER BY id")?;
            let counters = stmt
                .query_map([], Counter::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(counters)
        })?)
    }

    pub fn get(&self, id: CounterId) -> Result<Counter> {
        self.db
            .with_connection(|conn| {
                Ok(conn
                    .query_row(SELECT_COUNTER, [id], Counter::from_row)
                    .optional()?)
            })?
            .ok_or(CounterError::NotFound(id))
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self.db.with_connection(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM counters", [], |row| row.get(0))?)
        })?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Create a counter at zero.
    pub fn add(&self, label: &str) -> Result<Counter> {
        let label = normalize_label(label)?;

        let counter = self.db.transaction(|conn| {
            conn.execute(
                "INSERT INTO counters (label, count) VALUES (?1, 0)",
                [&label],
            )?;
            Ok(Counter {
                id: conn.last_insert_rowid(),
                label: label.clone(),
                count: 0,
            })
        })?;

        tracing::info!(counter_id = counter.id, label = %counter.label, "Added counter");

        Ok(counter)
    }

    /// Bump a counter by one and return its new state.
    pub fn increment(&self, id: CounterId) -> Result<Counter> {
        let updated = self.db.transaction(|conn| {
            let changed = conn.execute(
                "UPDATE counters SET count = count + 1 WHERE id = ?1",
                [id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            Ok(Some(conn.query_row(SELECT_COUNTER, [id], Counter::from_row)?))
        })?;

        let Some(counter) = updated else {
            tracing::warn!(counter_id = id, "Increment of unknown counter");
            return Err(CounterError::NotFound(id));
        };

        tracing::debug!(counter_id = id, count = counter.count, "Incremented counter");

        Ok(counter)
    }

    pub fn remove(&self, id: CounterId) -> Result<()> {
        let removed = self.db.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM counters WHERE id = ?1", [id])?)
        })?;

        if removed == 0 {
            tracing::warn!(counter_id = id, "Removal of unknown counter");
            return Err(CounterError::NotFound(id));
        }

        tracing::info!(counter_id = id, "Removed counter");

        Ok(())
    }

}

impl Clone for CounterStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CounterStore {
        let store = CounterStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let store = CounterStore::new(db.clone());
        store.initialize().unwrap();
        let counter = store.add("Main St").unwrap();

        store.initialize().unwrap();
        store.initialize().unwrap();

        assert_eq!(store.list().unwrap(), vec![counter]);
        assert!(db.has_counters_table().unwrap());
    }

    #[test]
    fn test_list_empty() {
        let store = store();
        assert!(store.list().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_add_then_list() {
        let store = store();
        let counter = store.add("X").unwrap();

        assert_eq!(counter.label, "X");
        assert_eq!(counter.count, 0);

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], counter);
    }

    #[test]
    fn test_add_rejects_empty_label() {
        let store = store();

        let err = store.add("").unwrap_err();
        assert!(matches!(err, CounterError::Validation(_)));
        assert!(err.is_recoverable());

        assert!(matches!(store.add("   "), Err(CounterError::Validation(_))));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let store = store();
        let first = store.add("Main St").unwrap();
        let second = store.add("Main St").unwrap();
        assert_ne!(first.id, second.id);

        store.remove(second.id).unwrap();
        let third = store.add("Elm St").unwrap();
        assert!(third.id > second.id);
    }

    #[test]
    fn test_increment_n_times() {
        let store = store();
        let counter = store.add("Main St").unwrap();

        assert_eq!(store.increment(counter.id).unwrap().count, 1);
        for _ in 0..4 {
            store.increment(counter.id).unwrap();
        }
        assert_eq!(store.get(counter.id).unwrap().count, 5);
    }

    #[test]
    fn test_increment_only_touches_target() {
        let store = store();
        let a = store.add("Main St").unwrap();
        let b = store.add("Elm St").unwrap();

        store.increment(a.id).unwrap();

        assert_eq!(store.get(a.id).unwrap().count, 1);
        assert_eq!(store.get(b.id).unwrap().count, 0);
    }

    #[test]
    fn test_increment_unknown_is_not_found() {
        let store = store();
        let counter = store.add("Main St").unwrap();

        assert!(matches!(
            store.increment(counter.id + 100),
            Err(CounterError::NotFound(id)) if id == counter.id + 100
        ));
        assert_eq!(store.list().unwrap(), vec![counter]);
    }

    #[test]
    fn test_remove() {
        let store = store();
        let keep = store.add("Main St").unwrap();
        let gone = store.add("Elm St").unwrap();

        store.remove(gone.id).unwrap();
        assert_eq!(store.list().unwrap(), vec![keep]);

        assert!(matches!(
            store.remove(gone.id),
            Err(CounterError::NotFound(_))
        ));
        assert!(matches!(
            store.increment(gone.id),
            Err(CounterError::NotFound(_))
        ));
        assert!(matches!(store.get(gone.id), Err(CounterError::NotFound(_))));
    }

    #[test]
    fn test_failed_remove_leaves_table_unchanged() {
        let store = store();
        let a = store.add("Main St").unwrap();
        let b = store.add("Elm St").unwrap();
        store.increment(a.id).unwrap();
        let seeded = store.list().unwrap();

        let never_issued = b.id + 1000;
        assert!(matches!(
            store.remove(never_issued),
            Err(CounterError::NotFound(id)) if id == never_issued
        ));
        assert_eq!(store.list().unwrap(), seeded);

        store.remove(b.id).unwrap();
        let after_remove = store.list().unwrap();
        assert_eq!(after_remove.len(), 1);
        assert_eq!(after_remove[0].id, a.id);
        assert_eq!(after_remove[0].count, 1);

        assert!(matches!(
            store.remove(b.id),
            Err(CounterError::NotFound(id)) if id == b.id
        ));
        assert_eq!(store.list().unwrap(), after_remove);
    }

    #[test]
    fn test_open_unwritable_location_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("tally.db");

        let err = CounterStore::open(path).err().unwrap();
        assert!(matches!(err, CounterError::StorageUnavailable(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_counters_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.db");

        {
            let store = CounterStore::open(&path).unwrap();
            store.initialize().unwrap();
            let counter = store.add("Main St").unwrap();
            store.increment(counter.id).unwrap();
        }

        let store = CounterStore::open(&path).unwrap();
        store.initialize().unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].label, "Main St");
        assert_eq!(listed[0].count, 1);
    }
}
