//! In-process record store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::registry::Registration;
use crate::store::{RecordStore, StoreError};

/// A thread-safe map of CURP → registration.
///
/// Cloning shares the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<String, Registration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing records, refusing duplicate CURPs.
    pub fn from_records(records: Vec<Registration>) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            let curp = record.curp.clone();
            store
                .insert_now(record)
                .map_err(|_| StoreError::Corrupt(format!("curp {curp} appears more than once")))?;
        }
        Ok(store)
    }

    /// Atomic check-and-insert on the CURP shard.
    pub(crate) fn insert_now(&self, record: Registration) -> Result<Registration, StoreError> {
        match self.records.entry(record.curp.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate { curp: record.curp }),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    pub(crate) fn contains(&self, curp: &str) -> bool {
        self.records.contains_key(curp)
    }

    /// All records ordered by creation time.
    pub fn snapshot(&self) -> Vec<Registration> {
        let mut records: Vec<Registration> =
            self.records.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: Registration) -> Result<Registration, StoreError> {
        self.insert_now(record)
    }

    async fn find_by_curp(&self, curp: &str) -> Result<Option<Registration>, StoreError> {
        Ok(self.records.get(curp).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.len())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
