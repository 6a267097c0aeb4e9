//! Project repository.

use obras_core::{Obra, RowId};
use serde::Serialize;
use serde_json::Value;

use super::client::{eq, StoreClient, StoreError};

const TABLE: &str = "obras";

/// Row sent to the store when creating a project.
#[derive(Debug, Clone, Serialize)]
pub struct NewObra {
    pub usuario_id: RowId,
    pub nome_obra: String,
    /// Sent as `null` when absent.
    pub valor_total: Option<Value>,
}

/// Repository for project rows.
pub struct ObraRepo {
    store: StoreClient,
}

impl ObraRepo {
    /// Create a new project repository over `store`.
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Creates a project, returning the rows echoed by the store.
    pub async fn create(&self, obra: &NewObra) -> Result<Value, StoreError> {
        self.store.insert(TABLE, obra).await
    }

    /// Lists every project owned by `usuario_id`.
    pub async fn list_by_user(&self, usuario_id: &str) -> Result<Vec<Obra>, StoreError> {
        self.store
            .select(TABLE, &[("usuario_id", eq(usuario_id))], "*")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_new_obra_sends_null_total() {
        let obra = NewObra {
            usuario_id: "u1".into(),
            nome_obra: "Casa Verde".to_string(),
            valor_total: None,
        };
        assert_eq!(
            serde_json::to_value(&obra).unwrap(),
            json!({ "usuario_id": "u1", "nome_obra": "Casa Verde", "valor_total": null })
        );
    }

    #[tokio::test]
    async fn test_list_by_user_decodes_rows() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/obras")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("usuario_id".into(), "eq.u1".into()),
                Matcher::UrlEncoded("select".into(), "*".into()),
            ]))
            .with_status(200)
            .with_body(
                json!([
                    { "id": "o1", "usuario_id": "u1", "nome_obra": "Casa Verde", "valor_total": null },
                    { "id": "o2", "usuario_id": "u1", "nome_obra": "Galpão" }
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let repo = ObraRepo::new(StoreClient::new(&server.url(), "k"));
        let obras = repo.list_by_user("u1").await.unwrap();

        assert_eq!(obras.len(), 2);
        assert_eq!(obras[0].id, RowId::from("o1"));
        assert_eq!(obras[1].name(), "Galpão");
        mock.assert_async().await;
    }
}
