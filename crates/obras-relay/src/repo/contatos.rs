//! WhatsApp contact repository.

use obras_core::{ContatoWhatsapp, RowId};
use serde::Serialize;
use serde_json::Value;

use super::client::{eq, StoreClient, StoreError};

const TABLE: &str = "contatos_whatsapp";

#[derive(Debug, Serialize)]
struct ContatoRow<'a> {
    wa_id: &'a RowId,
    usuario_id: &'a RowId,
}

/// Repository for WhatsApp-to-user links.
pub struct ContatoRepo {
    store: StoreClient,
}

impl ContatoRepo {
    /// Create a new contact repository over `store`.
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Points `wa_id` at `usuario_id`, replacing any previous link.
    pub async fn link(&self, wa_id: &RowId, usuario_id: &RowId) -> Result<Value, StoreError> {
        self.store
            .upsert(TABLE, "wa_id", &ContatoRow { wa_id, usuario_id })
            .await
    }

    /// Finds the link for `wa_id`, if any.
    pub async fn find_by_wa_id(&self, wa_id: &str) -> Result<Option<ContatoWhatsapp>, StoreError> {
        let rows: Vec<ContatoWhatsapp> = self
            .store
            .select(TABLE, &[("wa_id", eq(wa_id))], "wa_id,usuario_id")
            .await?;
        Ok(rows.into_iter().next())
    }
}
