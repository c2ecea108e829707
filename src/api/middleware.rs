use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::handlers::AppState;

/// Count every routed request, and count it as successful when the
/// response status is below 400.
pub async fn track_requests(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.requests.fetch_add(1, Ordering::Relaxed);

    let response = next.run(request).await;

    if response.status().as_u16() < 400 {
        state.successful.fetch_add(1, Ordering::Relaxed);
    }

    response
}
