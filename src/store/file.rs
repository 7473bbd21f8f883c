use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use super::TripStore;
use crate::error::StoreError;
use crate::types::trip::TripRecord;

const FILE_NAME: &str = "technician_locations.json";

/// All records in one pretty-printed JSON object keyed by request id.
pub struct FileStore {
    dir: PathBuf,
    path: PathBuf,
    // serializes read-modify-write of the whole document
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(FILE_NAME);
        Self {
            dir,
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, TripRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt {
            path: self.path.clone(),
            reason: err.to_string(),
        })
    }

    fn write_all(&self, records: &BTreeMap<String, TripRecord>) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.dir.join(format!("{}.{}.tmp", FILE_NAME, Uuid::new_v4()));
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}

impl TripStore for FileStore {
    fn get(&self, request_id: &str) -> Result<Option<TripRecord>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_all()?.remove(request_id))
    }

    fn put(&self, record: &TripRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut records = self.read_all()?;
        records.insert(record.request_id.clone(), record.clone());
        self.write_all(&records)?;
        tracing::debug!(
            "Persisted trip {} ({} records in {})",
            record.request_id,
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}
