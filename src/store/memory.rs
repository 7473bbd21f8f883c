use dashmap::DashMap;

use super::TripStore;
use crate::error::StoreError;
use crate::types::trip::TripRecord;

#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<String, TripRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TripStore for MemoryStore {
    fn get(&self, request_id: &str) -> Result<Option<TripRecord>, StoreError> {
        Ok(self.records.get(request_id).map(|entry| entry.clone()))
    }

    fn put(&self, record: &TripRecord) -> Result<(), StoreError> {
        self.records
            .insert(record.request_id.clone(), record.clone());
        Ok(())
    }
}
