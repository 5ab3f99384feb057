//! Stand-in used when the configured store could not be opened.

use async_trait::async_trait;

use crate::registry::Registration;
use crate::store::{RecordStore, StoreError};

/// Every operation fails with [`StoreError::Unavailable`].
pub struct DisconnectedStore {
    reason: String,
}

impl DisconnectedStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl RecordStore for DisconnectedStore {
    async fn insert(&self, _record: Registration) -> Result<Registration, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    async fn find_by_curp(&self, _curp: &str) -> Result<Option<Registration>, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    fn backend(&self) -> &'static str {
        "disconnected"
    }
}
