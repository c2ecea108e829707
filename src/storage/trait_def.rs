use crate::models::UrlRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record with id {0}")]
    NotFound(String),
    #[error("store medium unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("store content is not well-formed: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable mapping from short identifier to URL record.
///
/// Every operation is one atomic read-modify-write of the entire persisted
/// set under the implementation's exclusive lock, so callers see strictly
/// serial behavior at whole-set-rewrite cost. The persisted set is the
/// single source of truth; implementations keep no cache across calls.
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Append a record unconditionally. Uniqueness of `record.id` is the
    /// caller's contract: check with [`get`](Self::get) before creating.
    async fn create(&self, record: UrlRecord) -> StoreResult<()>;

    /// Look up a record by id, counting the resolution: the matching
    /// record's `hits` is incremented and persisted before a copy is
    /// returned.
    async fn get(&self, id: &str) -> StoreResult<UrlRecord>;

    /// Overwrite the first record whose id matches (`url`, `created_at`,
    /// `hits`, `ttl`; the id itself is immutable). When no id matches this
    /// is a no-op that still rewrites the unchanged set and succeeds.
    // TODO: failing with NotFound here would be the stricter contract;
    // revisit if a caller ever needs to distinguish the no-op.
    async fn update(&self, record: UrlRecord) -> StoreResult<()>;

    /// Remove the record with the given id. Fails with
    /// [`StoreError::NotFound`] without rewriting when no record matches.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Every currently persisted record, in insertion order. An empty
    /// store yields an empty vec, not an error.
    async fn list_all(&self) -> StoreResult<Vec<UrlRecord>>;

    /// Replace the persisted set with the empty set.
    async fn clear_all(&self) -> StoreResult<()>;

    /// Drop every record whose lifetime has elapsed at `now` and persist
    /// the survivors. Returns how many records were removed. A medium that
    /// does not exist yet means nothing to sweep: Ok(0), and the medium is
    /// not created.
    async fn remove_expired(&self, now: i64) -> StoreResult<usize>;
}
