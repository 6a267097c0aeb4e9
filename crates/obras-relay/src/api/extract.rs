//! Request body and query extraction.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor that tolerates a missing body.
///
/// Unlike [`axum::Json`] it ignores `Content-Type` and turns an empty body
/// into `T::default()`, so absent fields surface as the endpoint's own
/// "missing field" error. Bodies that are not valid JSON for `T` are
/// rejected with [`AppError::MalformedBody`].
#[derive(Debug)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedBody(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::MalformedBody(e.to_string()))
    }
}

/// Query string extractor whose rejection is an [`AppError`].
///
/// Wraps [`axum::extract::Query`] so malformed query strings (such as a
/// repeated parameter) get the same JSON error body as every other `400`.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|e| AppError::MalformedQuery(e.body_text()))
    }
}
