use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::models::{
    CreateUrlRequest, CreateUrlResponse, ListIdsResponse, RecordStatsResponse, ResolveResponse,
    ServiceStatsResponse, UpdateUrlRequest, UrlRecord,
};
use crate::shortcode;
use crate::storage::{StoreError, UrlStore};

pub struct AppState {
    pub store: Arc<dyn UrlStore>,
    pub default_ttl: u64,
    pub started_at: Instant,
    pub requests: AtomicU64,
    pub successful: AtomicU64,
}

impl AppState {
    pub fn new(store: Arc<dyn UrlStore>, default_ttl: u64) -> Self {
        Self {
            store,
            default_ttl,
            started_at: Instant::now(),
            requests: AtomicU64::new(0),
            successful: AtomicU64::new(0),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Create a short identifier for a URL.
///
/// The identifier is derived from the URL's content hash, so an id that
/// already resolves is simply reused: the first writer of an id keeps it,
/// even on the rare hash collision between different URLs.
pub async fn create_url(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), (StatusCode, Json<ErrorResponse>)> {
    if !shortcode::validate_url(&payload.value) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "not a valid URL".to_string(),
            }),
        ));
    }

    let ttl = match payload.ttl {
        Some(ttl) => ttl,
        None => {
            debug!(
                default_ttl = state.default_ttl,
                "no ttl in request, using default"
            );
            state.default_ttl
        }
    };

    let id = shortcode::shorten(&payload.value);

    match state.store.get(&id).await {
        Ok(_) => Ok((StatusCode::CREATED, Json(CreateUrlResponse { id }))),
        Err(StoreError::NotFound(_)) => {
            let record = UrlRecord::new(id.clone(), payload.value, ttl);
            state.store.create(record).await.map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to create URL: {}", e),
                    }),
                )
            })?;
            Ok((StatusCode::CREATED, Json(CreateUrlResponse { id })))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to create URL: {}", e),
            }),
        )),
    }
}

/// Resolve a short identifier back to its URL, counting the hit.
pub async fn resolve_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ResolveResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.store.get(&id).await {
        Ok(record) => Ok((
            StatusCode::MOVED_PERMANENTLY,
            Json(ResolveResponse { value: record.url }),
        )),
        Err(StoreError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "URL not found".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to resolve URL: {}", e),
            }),
        )),
    }
}

/// Point an existing identifier at a new URL.
pub async fn update_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let mut record = match state.store.get(&id).await {
        Ok(record) => record,
        Err(StoreError::NotFound(_)) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "URL not found".to_string(),
                }),
            ));
        }
        Err(e) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to update URL: {}", e),
                }),
            ));
        }
    };

    if !shortcode::validate_url(&payload.url) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "not a valid URL".to_string(),
            }),
        ));
    }

    record.url = payload.url;
    state.store.update(record).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to update URL: {}", e),
            }),
        )
    })?;

    Ok(StatusCode::OK)
}

/// Drop the mapping for an identifier.
pub async fn delete_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.store.delete(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "URL not found".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to delete URL: {}", e),
            }),
        )),
    }
}

/// List every live short identifier.
pub async fn list_ids(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListIdsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.list_all().await {
        Ok(records) => Ok(Json(ListIdsResponse {
            keys: records.into_iter().map(|r| r.id).collect(),
        })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to list URLs: {}", e),
            }),
        )),
    }
}

/// Drop every mapping.
pub async fn delete_all(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.store.clear_all().await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to clear URLs: {}", e),
            }),
        )),
    }
}

/// Aggregate request/hit counters for the whole service.
pub async fn service_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ServiceStatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let records = state.store.list_all().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to read store: {}", e),
            }),
        )
    })?;

    let requests = state.requests.load(Ordering::Relaxed);
    let successful = state.successful.load(Ordering::Relaxed);
    let elapsed = state.started_at.elapsed().as_secs_f64();

    let request_rate = if elapsed > 0.0 {
        requests as f64 / elapsed
    } else {
        0.0
    };
    let success_rate = if requests > 0 {
        successful as f64 / requests as f64
    } else {
        0.0
    };

    Ok(Json(ServiceStatsResponse {
        total_urls: records.len().to_string(),
        total_requests: requests.to_string(),
        request_rate: format!("{:.6}", request_rate),
        successful_requests: successful.to_string(),
        success_rate: format!("{:.6}", success_rate),
    }))
}

/// Per-identifier hit counter. Goes through the counting read, so asking
/// for stats is itself recorded as a resolution.
pub async fn record_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecordStatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.get(&id).await {
        Ok(record) => Ok(Json(RecordStatsResponse {
            id: record.id,
            url: record.url,
            hits: record.hits,
        })),
        Err(StoreError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "URL not found".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to read stats: {}", e),
            }),
        )),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
