//! Natural-language expense questions.
//!
//! A question such as "quanto gastei na Casa Verde em setembro?" is answered
//! in two store round-trips: the user's projects, then the expenses of the
//! period for the project named in the text (or for all of them).

use axum::{extract::State, Json};
use obras_core::{
    compose_answer, find_by_name, normalize_text, parse_month_year, ExpenseSummary, Obra, RowId,
    NO_PROJECTS_ANSWER,
};
use tracing::debug;

use crate::api::extract::LenientJson;
use crate::error::AppError;
use crate::models::{
    present, present_id, AnswerDetails, AnswerResponse, DateRange, NoProjectsDetails, ObraRef,
    QuestionRequest, ReportDetails,
};
use crate::repo::{GastoRepo, ObraRepo};
use crate::AppState;

/// Answer a free-text question about a user's expenses.
///
/// # Endpoint
///
/// `POST /pergunta`
///
/// # Response
///
/// - `200 OK`: `resposta` with the rendered answer and `detalhes` with the
///   numbers behind it
/// - `400 Bad Request`: `usuario_id` or `texto` missing
pub async fn ask(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<QuestionRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let (usuario_id, texto) = match (present_id(body.usuario_id), present(body.texto)) {
        (Some(usuario_id), Some(texto)) => (usuario_id, texto),
        _ => return Err(AppError::missing(&["usuario_id", "texto"])),
    };

    let period = parse_month_year(&texto);

    let obras = ObraRepo::new(state.store.clone())
        .list_by_user(&usuario_id.to_string())
        .await?;

    if obras.is_empty() {
        return Ok(Json(AnswerResponse {
            success: true,
            resposta: NO_PROJECTS_ANSWER.to_string(),
            detalhes: AnswerDetails::NoProjects(NoProjectsDetails {
                month: period.month,
                year: period.year,
                summary: ExpenseSummary::empty(),
            }),
        }));
    }

    let obra = find_by_name(&texto, &obras);
    let obra_ids: Vec<RowId> = match obra {
        Some(obra) => vec![obra.id.clone()],
        None => obras.iter().map(|o| o.id.clone()).collect(),
    };
    debug!(
        usuario_id = %usuario_id,
        month = period.month,
        year = period.year,
        matched = obra.is_some(),
        projects = obra_ids.len(),
        "Answering question"
    );

    let gastos = GastoRepo::new(state.store.clone())
        .list_by_obras_in_period(&obra_ids, &period)
        .await?;
    let summary = ExpenseSummary::from_expenses(&gastos, normalize_text);
    let resposta = compose_answer(&period, obra.map(Obra::name), &summary);

    Ok(Json(AnswerResponse {
        success: true,
        resposta,
        detalhes: AnswerDetails::Report(ReportDetails {
            month: period.month,
            year: period.year,
            periodo: DateRange {
                start: period.start.to_string(),
                end: period.end.to_string(),
            },
            obra: obra.map(|o| ObraRef {
                id: o.id.clone(),
                nome_obra: o.nome_obra.clone(),
            }),
            summary,
        }),
    }))
}
