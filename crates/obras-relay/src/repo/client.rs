//! HTTP client for the PostgREST data store.
//!
//! Every call goes to `{base}/rest/v1/{table}` with the service key sent both
//! as `apikey` and as a bearer token. Filters use PostgREST syntax
//! (`column=eq.value`, `column=in.(a,b)` and so on).

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// `Prefer` header for inserts that echo the created rows.
const RETURN_REPRESENTATION: &str = "return=representation";
/// `Prefer` header for upserts that echo the resulting rows.
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

/// Failures talking to the data store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request could not be sent or its body not read.
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store returned status {status}")]
    Status {
        status: u16,
        /// Response body, as JSON when it parses, otherwise as a string.
        body: Value,
    },

    /// A success response did not hold the expected JSON.
    #[error("Invalid store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct StoreClient {
    http: Client,
    base_url: String,
    key: String,
}

impl StoreClient {
    /// Creates a client for the store at `base_url` using `key`.
    pub fn new(base_url: &str, key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
            .header("Content-Type", "application/json")
    }

    /// Reads rows from `table`.
    ///
    /// `filters` are `(column, "op.value")` pairs; `columns` is the
    /// PostgREST `select` list.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        columns: &str,
    ) -> Result<Vec<T>, StoreError> {
        debug!(table, filters = filters.len(), "Selecting rows");

        let response = self
            .request(Method::GET, table)
            .query(filters)
            .query(&[("select", columns)])
            .send()
            .await?;

        let body = read_json(table, response).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Inserts `row` into `table` and returns the representation the store
    /// sends back.
    pub async fn insert<B: Serialize + ?Sized>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<Value, StoreError> {
        debug!(table, "Inserting row");

        let response = self
            .request(Method::POST, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(row)
            .send()
            .await?;

        read_json(table, response).await
    }

    /// Inserts `row`, merging into the existing row that shares
    /// `on_conflict`.
    pub async fn upsert<B: Serialize + ?Sized>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &B,
    ) -> Result<Value, StoreError> {
        debug!(table, on_conflict, "Upserting row");

        let response = self
            .request(Method::POST, table)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", MERGE_DUPLICATES)
            .json(row)
            .send()
            .await?;

        read_json(table, response).await
    }
}

async fn read_json(table: &str, response: Response) -> Result<Value, StoreError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        warn!(table, status = status.as_u16(), "Store rejected request");
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

/// `eq.` filter value.
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// `in.(...)` filter value with every item double-quoted.
pub fn in_list<T: std::fmt::Display>(values: &[T]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
    format!("in.({})", quoted.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_filter_helpers() {
        assert_eq!(eq("u1"), "eq.u1");
        assert_eq!(eq(42), "eq.42");
        assert_eq!(in_list(&["a", "b"]), "in.(\"a\",\"b\")");
        assert_eq!(in_list::<&str>(&[]), "in.()");
    }

    #[tokio::test]
    async fn test_select_sends_auth_and_filters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/obras")
            .match_header("apikey", "k")
            .match_header("authorization", "Bearer k")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("usuario_id".into(), "eq.u 1".into()),
                Matcher::UrlEncoded("select".into(), "*".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([{ "id": 1 }]).to_string())
            .expect(1)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "k");
        let rows: Vec<Value> = client
            .select("obras", &[("usuario_id", eq("u 1"))], "*")
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({ "id": 1 })]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insert_prefers_representation() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/gastos")
            .match_header("prefer", "return=representation")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "obra_id": "o1", "valor": 10 })))
            .with_status(201)
            .with_body(json!([{ "id": 5, "obra_id": "o1", "valor": 10 }]).to_string())
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "k");
        let created = client
            .insert("gastos", &json!({ "obra_id": "o1", "valor": 10 }))
            .await
            .unwrap();

        assert_eq!(created[0]["id"], 5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upsert_merges_on_conflict_column() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/contatos_whatsapp")
            .match_query(Matcher::UrlEncoded("on_conflict".into(), "wa_id".into()))
            .match_header("prefer", "resolution=merge-duplicates,return=representation")
            .with_status(201)
            .with_body(json!([{ "wa_id": "5511", "usuario_id": "u1" }]).to_string())
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "k");
        let rows = client
            .upsert("contatos_whatsapp", "wa_id", &json!({ "wa_id": "5511", "usuario_id": "u1" }))
            .await
            .unwrap();

        assert_eq!(rows[0]["usuario_id"], "u1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_keeps_json_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/rest/v1/gastos")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(json!({ "message": "invalid input syntax" }).to_string())
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "k");
        let err = client
            .select::<Value>("gastos", &[("obra_id", eq("x"))], "*")
            .await
            .unwrap_err();

        match err {
            StoreError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body["message"], "invalid input syntax");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_text_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/rest/v1/obras")
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "k");
        let err = client.insert("obras", &json!({})).await.unwrap_err();

        match err {
            StoreError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, json!("upstream unavailable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_with_invalid_json_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/rest/v1/obras")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "k");
        let err = client
            .select::<Value>("obras", &[], "*")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_request_error() {
        let client = StoreClient::new("http://127.0.0.1:9", "k");
        let err = client.select::<Value>("obras", &[], "*").await.unwrap_err();
        assert!(matches!(err, StoreError::Request(_)));
    }
}
