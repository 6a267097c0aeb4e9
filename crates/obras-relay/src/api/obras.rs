//! Project API handlers.

use axum::{extract::State, Json};
use obras_core::Obra;
use serde_json::Value;

use crate::api::extract::{LenientJson, QueryParams};
use crate::error::AppError;
use crate::models::{present, present_id, CreateObraRequest, DataResponse, ObrasQuery};
use crate::repo::obras::NewObra;
use crate::repo::ObraRepo;
use crate::AppState;

/// Create a project for a user.
///
/// # Endpoint
///
/// `POST /criar-obra`
///
/// # Response
///
/// - `200 OK`: rows created by the store
/// - `400 Bad Request`: `usuario_id` or `nome_obra` missing
/// - store status: the store rejected the insert
pub async fn create_obra(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<CreateObraRequest>,
) -> Result<Json<DataResponse<Value>>, AppError> {
    let (usuario_id, nome_obra) = match (present_id(body.usuario_id), present(body.nome_obra)) {
        (Some(usuario_id), Some(nome_obra)) => (usuario_id, nome_obra),
        _ => return Err(AppError::missing(&["usuario_id", "nome_obra"])),
    };

    let repo = ObraRepo::new(state.store.clone());
    let data = repo
        .create(&NewObra {
            usuario_id,
            nome_obra,
            valor_total: body.valor_total,
        })
        .await?;

    Ok(Json(DataResponse::ok(data)))
}

/// List a user's projects.
///
/// # Endpoint
///
/// `GET /obras?usuario_id=...`
///
/// # Response
///
/// - `200 OK`: the user's project rows
/// - `400 Bad Request`: `usuario_id` missing
pub async fn list_obras(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ObrasQuery>,
) -> Result<Json<DataResponse<Vec<Obra>>>, AppError> {
    let usuario_id = present(query.usuario_id).ok_or_else(|| AppError::missing(&["usuario_id"]))?;

    let repo = ObraRepo::new(state.store.clone());
    let obras = repo.list_by_user(&usuario_id).await?;

    Ok(Json(DataResponse::ok(obras)))
}
