use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use super::handlers::{
    create_url, delete_all, delete_url, health_check, list_ids, record_stats, resolve_url,
    service_stats, update_url, AppState,
};
use super::middleware::track_requests;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Everything except the health probe runs through the request tracker.
    let tracked = Router::new()
        .route("/", get(list_ids).post(create_url).delete(delete_all))
        .route("/metrics", get(service_stats))
        .route("/metrics/{id}", get(record_stats))
        .route(
            "/{id}",
            get(resolve_url).put(update_url).delete(delete_url),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            track_requests,
        ))
        .with_state(Arc::clone(&state));

    Router::new()
        .route("/health", get(health_check))
        .merge(tracked)
}
