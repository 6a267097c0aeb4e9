//! Health check.

use axum::Json;

use crate::models::HealthResponse;

/// Reports that the server is up. Needs no API key.
///
/// # Endpoint
///
/// `GET /`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "MCP server running 🚀".to_string(),
    })
}
