//! Rows owned by the remote data store.
//!
//! Columns the relay does not interpret are kept in `extra` so rows can be
//! handed back to clients exactly as the store returned them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::summary::DEFAULT_CATEGORY;

/// Identifier of a stored row.
///
/// The store (and its clients) may use text keys such as UUIDs or plain
/// integers; the JSON form received is kept on the way back out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl RowId {
    /// Returns `true` for an empty text identifier.
    pub fn is_blank(&self) -> bool {
        matches!(self, RowId::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Text(s)
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Int(n)
    }
}

/// A construction project (`obras` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obra {
    /// Row identifier.
    pub id: RowId,
    /// Owning user.
    #[serde(default)]
    pub usuario_id: Option<RowId>,
    /// Display name, used to recognise the project in free text.
    #[serde(default)]
    pub nome_obra: Option<String>,
    /// Contracted total, if any.
    #[serde(default)]
    pub valor_total: Option<Value>,
    /// Remaining columns, relayed untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Obra {
    /// Project name, or `""` when the row has none.
    pub fn name(&self) -> &str {
        self.nome_obra.as_deref().unwrap_or("")
    }
}

/// An expense attached to a project (`gastos` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gasto {
    #[serde(default)]
    pub id: Option<RowId>,
    #[serde(default)]
    pub obra_id: Option<RowId>,
    #[serde(default)]
    pub descricao: Option<String>,
    /// Raw amount as stored; see [`Gasto::amount`].
    #[serde(default)]
    pub valor: Value,
    /// Free-form category.
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Gasto {
    /// Numeric amount of the expense.
    ///
    /// Numbers are taken as-is and numeric strings are parsed. Anything
    /// else, including non-finite values, counts as zero.
    pub fn amount(&self) -> f64 {
        let amount = match &self.valor {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(0.0)
                } else {
                    s.parse::<f64>().ok()
                }
            }
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };
        amount.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Category as stored, falling back to [`DEFAULT_CATEGORY`] when missing or empty.
    pub fn category(&self) -> &str {
        match self.tipo.as_deref() {
            Some(tipo) if !tipo.is_empty() => tipo,
            _ => DEFAULT_CATEGORY,
        }
    }
}

/// Link between a WhatsApp account and a user (`contatos_whatsapp` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContatoWhatsapp {
    pub wa_id: RowId,
    pub usuario_id: RowId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
