//! Request timing middleware.

use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppState;

/// Middleware that logs request timing.
///
/// Requests slower than `slow_request_ms` are logged as warnings, the rest
/// at debug level. Query strings are left out of the log so filter values
/// such as user ids do not end up in it.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, routing::get, Router};
/// use obras_relay::middleware::timing_layer;
///
/// let app = Router::new()
///     .route("/obras", get(handler))
///     .layer(middleware::from_fn_with_state(state.clone(), timing_layer))
///     .with_state(state);
/// ```
pub async fn timing_layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status().as_u16();

    if duration > Duration::from_millis(state.config.slow_request_ms) {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status,
            duration_ms = duration.as_millis(),
            "Slow request"
        );
    } else {
        tracing::debug!(
            method = %method,
            path = %path,
            status = status,
            duration_ms = duration.as_millis(),
            "Request completed"
        );
    }

    response
}
