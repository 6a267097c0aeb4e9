//! Expense API handlers.

use axum::{extract::State, Json};
use obras_core::{ExpenseSummary, Gasto, Period};
use serde_json::Value;

use crate::api::extract::{LenientJson, QueryParams};
use crate::error::AppError;
use crate::models::{
    present, present_id, CreateGastoRequest, DataResponse, GastosQuery, MonthSummaryQuery,
    MonthSummaryResponse, Periodo,
};
use crate::repo::gastos::NewGasto;
use crate::repo::GastoRepo;
use crate::AppState;

/// Record an expense on a project.
///
/// # Endpoint
///
/// `POST /criar-gasto`
///
/// # Response
///
/// - `200 OK`: rows created by the store
/// - `400 Bad Request`: `obra_id` missing
/// - store status: the store rejected the insert
pub async fn create_gasto(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<CreateGastoRequest>,
) -> Result<Json<DataResponse<Value>>, AppError> {
    let obra_id = present_id(body.obra_id).ok_or_else(|| AppError::missing(&["obra_id"]))?;

    let repo = GastoRepo::new(state.store.clone());
    let data = repo
        .create(&NewGasto {
            obra_id,
            descricao: body.descricao,
            valor: body.valor,
            tipo: body.tipo,
        })
        .await?;

    Ok(Json(DataResponse::ok(data)))
}

/// List the expenses of a project.
///
/// # Endpoint
///
/// `GET /gastos?obra_id=...`
pub async fn list_gastos(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<GastosQuery>,
) -> Result<Json<DataResponse<Vec<Gasto>>>, AppError> {
    let obra_id = present(query.obra_id).ok_or_else(|| AppError::missing(&["obra_id"]))?;

    let repo = GastoRepo::new(state.store.clone());
    let gastos = repo.list_by_obra(&obra_id).await?;

    Ok(Json(DataResponse::ok(gastos)))
}

/// Totals of a project's expenses for one month.
///
/// # Endpoint
///
/// `GET /resumo-mes?obra_id=...&mes=1-12&ano=...`
///
/// # Response
///
/// - `200 OK`: count, total, totals per lowercased category and the five
///   largest expenses
/// - `400 Bad Request`: a parameter is missing, `mes` is not 1-12 or `ano`
///   is not a year between 1900 and 2999
pub async fn month_summary(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MonthSummaryQuery>,
) -> Result<Json<MonthSummaryResponse>, AppError> {
    let (obra_id, mes, ano) = match (present(query.obra_id), present(query.mes), present(query.ano))
    {
        (Some(obra_id), Some(mes), Some(ano)) => (obra_id, mes, ano),
        _ => return Err(AppError::missing(&["obra_id", "mes", "ano"])),
    };

    let month = mes.trim().parse::<u32>().ok();
    let year = ano.trim().parse::<i32>().ok();
    let period = month
        .zip(year)
        .and_then(|(month, year)| Period::from_month_year(month, year))
        .ok_or(AppError::InvalidParams(
            "mes deve ser 1-12 e ano entre 1900 e 2999",
        ))?;

    let repo = GastoRepo::new(state.store.clone());
    let gastos = repo.list_by_obra_in_period(&obra_id, &period).await?;
    let summary = ExpenseSummary::from_expenses(&gastos, str::to_lowercase);

    Ok(Json(MonthSummaryResponse {
        success: true,
        obra_id,
        periodo: Periodo::from(&period),
        summary,
    }))
}
