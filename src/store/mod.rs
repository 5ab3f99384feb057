//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! STORE_URI
//!     → open() (parse connection string)
//!         memory://          → MemoryStore
//!         file:///path.json  → FileStore (MemoryStore index + JSON document)
//!     → Arc<dyn RecordStore> handed to RegistrationService
//!
//! On a failed open the caller logs the error and falls back to
//! DisconnectedStore; there is no reconnect loop.
//! ```
//!
//! # Design Decisions
//! - Insert-only: no update or delete operations exist
//! - The uniqueness check on CURP and the insert are a single atomic step

pub mod disconnected;
pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::registry::Registration;

pub use disconnected::DisconnectedStore;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors surfaced by record stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this CURP already exists.
    #[error("duplicate key: curp {curp}")]
    Duplicate { curp: String },

    /// The store could not be reached at startup.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted data violates a store invariant.
    #[error("corrupt store: {0}")]
    Corrupt(String),

    #[error("invalid store URI: {0}")]
    InvalidUri(String),

    #[error("unsupported store scheme '{0}'")]
    UnsupportedScheme(String),
}

/// Persistence for registration documents.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record unless its CURP is already present.
    async fn insert(&self, record: Registration) -> Result<Registration, StoreError>;

    async fn find_by_curp(&self, curp: &str) -> Result<Option<Registration>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    /// Short backend name for logs and `/health`.
    fn backend(&self) -> &'static str;
}

/// Open the store named by a connection string.
pub fn open(uri: &str) -> Result<Arc<dyn RecordStore>, StoreError> {
    let url = Url::parse(uri).map_err(|e| StoreError::InvalidUri(format!("{uri}: {e}")))?;

    match url.scheme() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| StoreError::InvalidUri(format!("{uri}: not a local file path")))?;
            Ok(Arc::new(FileStore::open(path)?))
        }
        other => Err(StoreError::UnsupportedScheme(other.to_string())),
    }
}
