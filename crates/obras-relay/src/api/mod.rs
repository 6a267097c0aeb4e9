//! API handlers for the relay.

pub mod extract;
pub mod gastos;
pub mod health;
pub mod obras;
pub mod pergunta;
pub mod whatsapp;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    use crate::config::Config;
    use crate::AppState;

    pub const TEST_API_KEY: &str = "test-api-key";

    /// State pointing at a mock store.
    pub fn test_state(store_url: &str) -> AppState {
        AppState::new(Config {
            store_url: store_url.to_string(),
            store_key: "store-key".to_string(),
            api_key: TEST_API_KEY.to_string(),
            port: 0,
            slow_request_ms: 500,
        })
    }

    /// Helper to extract response body as JSON
    pub async fn extract_json(response: impl IntoResponse) -> (StatusCode, serde_json::Value) {
        let response: Response = response.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap();
        (status, json)
    }
}
