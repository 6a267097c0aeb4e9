//! Request errors and their JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::repo::StoreError;

/// Everything a handler can fail with.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or wrong `x-api-key`.
    #[error("Não autorizado")]
    Unauthorized,

    /// Required fields absent from the request.
    #[error("{0}")]
    MissingFields(String),

    /// Fields present but unusable.
    #[error("Parâmetros inválidos: {0}")]
    InvalidParams(&'static str),

    /// Request body is not valid JSON for the endpoint.
    #[error("JSON inválido: {0}")]
    MalformedBody(String),

    /// Query string cannot be read into the endpoint's parameters.
    #[error("Query inválida: {0}")]
    MalformedQuery(String),

    /// The data store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// Missing-field error listing `fields` the way clients expect.
    pub fn missing(fields: &[&str]) -> Self {
        let message = match fields {
            [single] => format!("Campo obrigatório: {}", single),
            many => format!("Campos obrigatórios: {}", many.join(", ")),
        };
        AppError::MissingFields(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": self.to_string() })),
            )
                .into_response(),
            AppError::MissingFields(_)
            | AppError::InvalidParams(_)
            | AppError::MalformedBody(_)
            | AppError::MalformedQuery(_) => {
                tracing::warn!(error = %self, "Rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "message": self.to_string() })),
                )
                    .into_response()
            }
            AppError::Store(StoreError::Status { status, body }) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(json!({ "success": false, "data": body }))).into_response()
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Data store call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
