//! JSON document store on local disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::registry::Registration;
use crate::store::memory::MemoryStore;
use crate::store::{RecordStore, StoreError};

/// Registrations kept in memory and mirrored to a JSON array on disk.
///
/// Inserts are serialized by `write_lock`. A record reaches the index only
/// after the file holding it has been written, so readers never see a record
/// that a failed write would drop.
pub struct FileStore {
    index: MemoryStore,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Load the document at `path`, or start empty if it does not exist yet.
    ///
    /// The parent directory must exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let index = if path.exists() {
            let content = std::fs::read(&path)?;
            let records: Vec<Registration> = if content.iter().all(u8::is_ascii_whitespace) {
                Vec::new()
            } else {
                serde_json::from_slice(&content)?
            };
            MemoryStore::from_records(records)?
        } else {
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            if !parent.is_dir() {
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                )));
            }
            MemoryStore::new()
        };

        tracing::debug!(path = %path.display(), records = index.len(), "Loaded registration file");

        Ok(Self {
            index,
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, records: &[Registration]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn insert(&self, record: Registration) -> Result<Registration, StoreError> {
        let _guard = self.write_lock.lock().await;

        if self.index.contains(&record.curp) {
            return Err(StoreError::Duplicate { curp: record.curp });
        }

        let mut records = self.index.snapshot();
        records.push(record.clone());
        self.persist(&records).await?;

        self.index.insert_now(record)
    }

    async fn find_by_curp(&self, curp: &str) -> Result<Option<Registration>, StoreError> {
        self.index.find_by_curp(curp).await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.index.count().await
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
