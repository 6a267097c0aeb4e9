//! Shared-secret authentication.
//!
//! Every endpoint except the health check requires the `x-api-key` header
//! to equal the configured key. Nothing reaches the data store otherwise.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::AppState;

/// Header carrying the client's key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Compares keys in constant time. An empty expected key matches nothing.
pub fn keys_match(provided: &str, expected: &str) -> bool {
    !expected.is_empty() && bool::from(provided.as_bytes().ct_eq(expected.as_bytes()))
}

/// Rejects requests without the right `x-api-key` with `401`.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !keys_match(provided, &state.config.api_key) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            has_key = !provided.is_empty(),
            "Rejected unauthenticated request"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
