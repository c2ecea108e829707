use crate::models::UrlRecord;
use crate::storage::{StoreError, StoreResult, UrlStore};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// File-backed record store: the whole set lives in one JSON array.
///
/// The store owns the mutex that linearizes every access to the file, CRUD
/// and expiry sweeps alike. Each operation loads the full set, mutates it,
/// and writes the full set back while holding the lock.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the persisted set. An absent or blank file is an empty
    /// store, not an error. Callers must hold the lock.
    async fn load(&self) -> StoreResult<Vec<UrlRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write the full set to a sibling temp file, then rename it into
    /// place so a crash mid-write never leaves a torn file behind.
    /// Callers must hold the lock.
    async fn persist(&self, records: &[UrlRecord]) -> StoreResult<()> {
        let bytes = serde_json::to_vec(records)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl UrlStore for FileStore {
    async fn create(&self, record: UrlRecord) -> StoreResult<()> {
        let _guard = self.lock.lock().await;

        let mut records = self.load().await?;
        records.push(record);
        self.persist(&records).await
    }

    async fn get(&self, id: &str) -> StoreResult<UrlRecord> {
        let _guard = self.lock.lock().await;

        let mut records = self.load().await?;
        let Some(pos) = records.iter().position(|r| r.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        records[pos].hits += 1;
        let found = records[pos].clone();
        self.persist(&records).await?;
        Ok(found)
    }

    async fn update(&self, record: UrlRecord) -> StoreResult<()> {
        let _guard = self.lock.lock().await;

        let mut records = self.load().await?;
        if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
            existing.url = record.url;
            existing.created_at = record.created_at;
            existing.hits = record.hits;
            existing.ttl = record.ttl;
        }

        // An unmatched id still rewrites the unchanged set and succeeds.
        self.persist(&records).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;

        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.persist(&records).await
    }

    async fn list_all(&self) -> StoreResult<Vec<UrlRecord>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn clear_all(&self) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        self.persist(&[]).await
    }

    async fn remove_expired(&self, now: i64) -> StoreResult<usize> {
        let _guard = self.lock.lock().await;

        // Nothing has been stored yet; sweeping must not create the file.
        if !tokio::fs::try_exists(&self.path).await? {
            tracing::debug!(path = %self.path.display(), "store file not created yet, nothing to sweep");
            return Ok(0);
        }

        let records = self.load().await?;
        let (live, expired): (Vec<_>, Vec<_>) =
            records.into_iter().partition(|r| !r.is_expired(now));

        self.persist(&live).await?;
        Ok(expired.len())
    }
}
