//! API models for serialization.

use obras_core::{ContatoWhatsapp, ExpenseSummary, Period, RowId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Keeps only identifiers that are actually filled in.
pub fn present_id(id: Option<RowId>) -> Option<RowId> {
    id.filter(|id| !id.is_blank())
}

/// Keeps only non-empty strings.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Wraps any present value, `null` included, in `Some`.
///
/// With `#[serde(default)]` an absent field stays `None`, so the two cases
/// can be told apart.
fn explicit<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Body of `POST /criar-gasto`.
///
/// The optional columns are `Some(Value::Null)` when the client sent an
/// explicit `null` and `None` when it left them out.
#[derive(Debug, Default, Deserialize)]
pub struct CreateGastoRequest {
    pub obra_id: Option<RowId>,
    #[serde(default, deserialize_with = "explicit")]
    pub descricao: Option<Value>,
    #[serde(default, deserialize_with = "explicit")]
    pub valor: Option<Value>,
    #[serde(default, deserialize_with = "explicit")]
    pub tipo: Option<Value>,
}

/// Body of `POST /criar-obra`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateObraRequest {
    pub usuario_id: Option<RowId>,
    pub nome_obra: Option<String>,
    pub valor_total: Option<Value>,
}

/// Query of `GET /obras`.
#[derive(Debug, Default, Deserialize)]
pub struct ObrasQuery {
    pub usuario_id: Option<String>,
}

/// Query of `GET /gastos`.
#[derive(Debug, Default, Deserialize)]
pub struct GastosQuery {
    pub obra_id: Option<String>,
}

/// Query of `GET /resumo-mes`.
#[derive(Debug, Default, Deserialize)]
pub struct MonthSummaryQuery {
    pub obra_id: Option<String>,
    /// Month, 1-12.
    pub mes: Option<String>,
    pub ano: Option<String>,
}

/// Body of `POST /pergunta`.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionRequest {
    pub usuario_id: Option<RowId>,
    /// Free-text question, e.g. "quanto gastei na Casa Verde em setembro?".
    pub texto: Option<String>,
}

/// Body of `POST /vincular-whatsapp`.
#[derive(Debug, Default, Deserialize)]
pub struct LinkWhatsappRequest {
    pub wa_id: Option<RowId>,
    pub usuario_id: Option<RowId>,
}

/// Query of `GET /usuario-por-whatsapp`.
#[derive(Debug, Default, Deserialize)]
pub struct WhatsappQuery {
    pub wa_id: Option<String>,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Successful response wrapping store rows.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Month and date range echoed by the month summary.
#[derive(Debug, Clone, Serialize)]
pub struct Periodo {
    pub mes: u32,
    pub ano: i32,
    pub start: String,
    pub end: String,
}

impl From<&Period> for Periodo {
    fn from(period: &Period) -> Self {
        Self {
            mes: period.month,
            ano: period.year,
            start: period.start.to_string(),
            end: period.end.to_string(),
        }
    }
}

/// Response of `GET /resumo-mes`.
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummaryResponse {
    pub success: bool,
    pub obra_id: String,
    pub periodo: Periodo,
    #[serde(flatten)]
    pub summary: ExpenseSummary,
}

/// Date range of a question's period.
#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Project a question was scoped to.
#[derive(Debug, Clone, Serialize)]
pub struct ObraRef {
    pub id: RowId,
    pub nome_obra: Option<String>,
}

/// Details when the user has no project and nothing was looked up.
#[derive(Debug, Clone, Serialize)]
pub struct NoProjectsDetails {
    pub month: u32,
    pub year: i32,
    #[serde(flatten)]
    pub summary: ExpenseSummary,
}

/// Totals for the matched project, or all of the user's projects.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDetails {
    pub month: u32,
    pub year: i32,
    pub periodo: DateRange,
    /// `null` when the question did not name a project.
    pub obra: Option<ObraRef>,
    #[serde(flatten)]
    pub summary: ExpenseSummary,
}

/// Details returned with an answer.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnswerDetails {
    NoProjects(NoProjectsDetails),
    Report(ReportDetails),
}

/// Response of `POST /pergunta`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub success: bool,
    pub resposta: String,
    pub detalhes: AnswerDetails,
}

/// Response of `GET /usuario-por-whatsapp`.
#[derive(Debug, Clone, Serialize)]
pub struct WhatsappLookupResponse {
    pub success: bool,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ContatoWhatsapp>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_gasto_keeps_explicit_nulls() {
        let body: CreateGastoRequest =
            serde_json::from_value(json!({ "obra_id": "o1", "descricao": null, "valor": 10 }))
                .unwrap();
        assert_eq!(body.descricao, Some(Value::Null));
        assert_eq!(body.valor, Some(json!(10)));
        assert_eq!(body.tipo, None);
    }

    #[test]
    fn test_present_helpers() {
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(present_id(Some(RowId::from(""))), None);
        assert_eq!(present_id(Some(RowId::Int(0))), Some(RowId::Int(0)));
    }

    #[test]
    fn test_periodo_from_period() {
        let periodo = Periodo::from(&Period::from_month_year(12, 2026).unwrap());
        assert_eq!(
            serde_json::to_value(&periodo).unwrap(),
            json!({ "mes": 12, "ano": 2026, "start": "2026-12-01", "end": "2027-01-01" })
        );
    }

    #[test]
    fn test_no_projects_details_shape() {
        let details = AnswerDetails::NoProjects(NoProjectsDetails {
            month: 9,
            year: 2026,
            summary: ExpenseSummary::empty(),
        });
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(
            json,
            json!({
                "month": 9,
                "year": 2026,
                "qtd_lancamentos": 0,
                "total": 0.0,
                "por_tipo": {},
                "top5": []
            })
        );
    }

    #[test]
    fn test_report_details_keep_null_obra() {
        let details = AnswerDetails::Report(ReportDetails {
            month: 9,
            year: 2026,
            periodo: DateRange {
                start: "2026-09-01".to_string(),
                end: "2026-10-01".to_string(),
            },
            obra: None,
            summary: ExpenseSummary::empty(),
        });
        let json = serde_json::to_value(&details).unwrap();
        assert!(json["obra"].is_null());
        assert!(json.as_object().unwrap().contains_key("obra"));
        assert_eq!(json["periodo"]["start"], "2026-09-01");
    }

    #[test]
    fn test_whatsapp_lookup_skips_empty_fields() {
        let response = WhatsappLookupResponse {
            success: true,
            found: false,
            message: Some("WhatsApp ainda não vinculado".to_string()),
            data: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(!json.as_object().unwrap().contains_key("data"));
    }
}
