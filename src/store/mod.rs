mod file;
mod memory;

use std::sync::Arc;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::{Config, StoreBackend};
use crate::error::StoreError;
use crate::types::trip::TripRecord;

/// Key-value persistence for trip records, keyed by request id.
pub trait TripStore: Send + Sync {
    fn get(&self, request_id: &str) -> Result<Option<TripRecord>, StoreError>;

    /// Insert or replace the record stored under `record.request_id`.
    fn put(&self, record: &TripRecord) -> Result<(), StoreError>;
}

pub fn from_config(config: &Config) -> Arc<dyn TripStore> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory trip store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::File => {
            let store = FileStore::new(&config.data_dir);
            tracing::info!("Using file trip store at {}", store.path().display());
            Arc::new(store)
        }
    }
}
