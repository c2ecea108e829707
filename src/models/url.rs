use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The sole persisted entity: one short-id-to-URL mapping.
///
/// Serialized with camelCase keys, so the store file carries exactly
/// `id`, `url`, `createdAt`, `hits`, `ttl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    /// Short identifier. Unique among live records; immutable once created.
    pub id: String,
    /// Original long-form URL.
    pub url: String,
    /// Creation time, unix seconds. Set once at insertion.
    pub created_at: i64,
    /// Number of successful resolutions. Never decreases.
    pub hits: u64,
    /// Lifetime in seconds after which the record may be swept.
    pub ttl: u64,
}

impl UrlRecord {
    pub fn new(id: String, url: String, ttl: u64) -> Self {
        Self {
            id,
            url,
            created_at: Utc::now().timestamp(),
            hits: 0,
            ttl,
        }
    }

    /// A record is dead once its lifetime has fully elapsed: the instant
    /// `created_at + ttl` itself already counts as expired.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.created_at.saturating_add(self.ttl as i64)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub value: String,
    pub ttl: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ListIdsResponse {
    pub keys: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordStatsResponse {
    pub id: String,
    pub url: String,
    pub hits: u64,
}

/// Aggregate service counters. Values are preformatted strings, matching
/// the wire shape the service has always produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatsResponse {
    pub total_urls: String,
    pub total_requests: String,
    pub request_rate: String,
    pub successful_requests: String,
    pub success_rate: String,
}
