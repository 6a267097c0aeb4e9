//! Expense repository.

use obras_core::{Gasto, Period, RowId};
use serde::Serialize;
use serde_json::Value;

use super::client::{eq, in_list, StoreClient, StoreError};

const TABLE: &str = "gastos";

/// Row sent to the store when recording an expense.
///
/// `None` fields are left out entirely; `Some(Value::Null)` is sent as
/// `null`.
#[derive(Debug, Clone, Serialize)]
pub struct NewGasto {
    pub obra_id: RowId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<Value>,
}

/// Repository for expense rows.
pub struct GastoRepo {
    store: StoreClient,
}

impl GastoRepo {
    /// Create a new expense repository over `store`.
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Records an expense, returning the rows echoed by the store.
    pub async fn create(&self, gasto: &NewGasto) -> Result<Value, StoreError> {
        self.store.insert(TABLE, gasto).await
    }

    /// Lists every expense of project `obra_id`.
    pub async fn list_by_obra(&self, obra_id: &str) -> Result<Vec<Gasto>, StoreError> {
        self.store
            .select(TABLE, &[("obra_id", eq(obra_id))], "*")
            .await
    }

    /// Lists expenses of project `obra_id` created within `period`.
    pub async fn list_by_obra_in_period(
        &self,
        obra_id: &str,
        period: &Period,
    ) -> Result<Vec<Gasto>, StoreError> {
        self.list_in_period(("obra_id", eq(obra_id)), period).await
    }

    /// Lists expenses of any of `obra_ids` created within `period`.
    pub async fn list_by_obras_in_period(
        &self,
        obra_ids: &[RowId],
        period: &Period,
    ) -> Result<Vec<Gasto>, StoreError> {
        self.list_in_period(("obra_id", in_list(obra_ids)), period)
            .await
    }

    async fn list_in_period(
        &self,
        obra_filter: (&str, String),
        period: &Period,
    ) -> Result<Vec<Gasto>, StoreError> {
        let filters = [
            obra_filter,
            ("created_at", format!("gte.{}", period.start)),
            ("created_at", format!("lt.{}", period.end)),
        ];
        self.store.select(TABLE, &filters, "*").await
    }
}
