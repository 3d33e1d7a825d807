//! Application object
//!
//! Owns the counter store and the presentation snapshot. Every mutation
//! goes to the store first and then re-lists, so the snapshot cannot drift.

use parking_lot::RwLock;
use std::sync::Arc;

use tally_counters::{Counter, CounterError, CounterId, CounterStore};
use tally_location::{Located, LocationProvider};
use tally_storage::StorageError;

use crate::config::Config;
use crate::error::CoreError;
use crate::state::{AppState, LocationStatus};
use crate::Result;

pub struct Tally {
    config: Config,
    store: CounterStore,
    state: Arc<RwLock<AppState>>,
}

impl Tally {
    /// Open the store at the configured path, creating its directory if needed.
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| {
                CounterError::StorageUnavailable(StorageError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })
            })?;
        }

        let store = CounterStore::open(&config.database_path)?;

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: CounterStore) -> Self {
        Self {
            config,
            store,
            state: Arc::new(RwLock::new(AppState::default())),
        }
    }

    /// Ensure the schema exists and load the counters.
    pub fn initialize(&self) -> Result<AppState> {
        self.store.initialize()?;
        let state = self.refresh()?;

        tracing::info!(
            database = %self.config.database_path.display(),
            counters = state.counters.len(),
            "Tally initialized"
        );

        Ok(state)
    }

    /// Re-derive the counter list from the store.
    pub fn refresh(&self) -> Result<AppState> {
        let counters = self.store.list()?;
        let mut state = self.state.write();
        state.counters = counters;
        Ok(state.clone())
    }

    pub fn state(&self) -> AppState {
        self.state.read().clone()
    }

    /// Mutations report the store's result. A failed re-list afterwards is
    /// logged and leaves the previous snapshot in place until the next refresh.
    pub fn add_counter(&self, label: &str) -> Result<Counter> {
        let counter = self.store.add(label)?;
        self.refresh_after("add");
        Ok(counter)
    }

    /// Add a counter labelled with the resolved location.
    ///
    /// Fails with [`CoreError::NoLocationLabel`] when there is none, so the
    /// UI can ask for a label instead.
    pub fn add_counter_here(&self) -> Result<Counter> {
        let label = self
            .state
            .read()
            .suggested_label()
            .ok_or(CoreError::NoLocationLabel)?;
        self.add_counter(&label)
    }

    pub fn increment(&self, id: CounterId) -> Result<Counter> {
        let counter = self.store.increment(id)?;
        self.refresh_after("increment");
        Ok(counter)
    }

    pub fn remove(&self, id: CounterId) -> Result<()> {
        self.store.remove(id)?;
        self.refresh_after("remove");
        Ok(())
    }

    fn refresh_after(&self, operation: &str) {
        if let Err(e) = self.refresh() {
            tracing::warn!(operation, error = %e, "Refresh after mutation failed");
        }
    }

    /// Resolve the current location once and record the outcome in the state.
    pub async fn locate<P>(&self, provider: &P) -> Result<Located>
    where
        P: LocationProvider + ?Sized,
    {
        self.state.write().location = LocationStatus::Pending;

        let result = tally_location::locate(provider, self.config.location_timeout()).await;

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Location lookup failed");
        }
        self.state.write().location = LocationStatus::from(&result);

        Ok(result?)
    }

    pub fn store(&self) -> &CounterStore {
        &self.store
    }
}

impl Clone for Tally {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            state: Arc::clone(&self.state),
        }
    }
}
