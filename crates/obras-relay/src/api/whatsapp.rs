//! WhatsApp account linking.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::api::extract::{LenientJson, QueryParams};
use crate::error::AppError;
use crate::models::{
    present, present_id, DataResponse, LinkWhatsappRequest, WhatsappLookupResponse, WhatsappQuery,
};
use crate::repo::ContatoRepo;
use crate::AppState;

const NOT_LINKED: &str = "WhatsApp ainda não vinculado";

/// Link a WhatsApp account to a user, replacing any previous link.
///
/// # Endpoint
///
/// `POST /vincular-whatsapp`
///
/// # Response
///
/// - `200 OK`: the stored link
/// - `400 Bad Request`: `wa_id` or `usuario_id` missing
pub async fn link_whatsapp(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<LinkWhatsappRequest>,
) -> Result<Json<DataResponse<Value>>, AppError> {
    let (wa_id, usuario_id) = match (present_id(body.wa_id), present_id(body.usuario_id)) {
        (Some(wa_id), Some(usuario_id)) => (wa_id, usuario_id),
        _ => return Err(AppError::missing(&["wa_id", "usuario_id"])),
    };

    let data = ContatoRepo::new(state.store.clone())
        .link(&wa_id, &usuario_id)
        .await?;
    info!(wa_id = %wa_id, usuario_id = %usuario_id, "Linked WhatsApp account");

    Ok(Json(DataResponse::ok(data)))
}

/// Find the user linked to a WhatsApp account.
///
/// # Endpoint
///
/// `GET /usuario-por-whatsapp?wa_id=...`
///
/// # Response
///
/// - `200 OK`: `found` tells whether a link exists
/// - `400 Bad Request`: `wa_id` missing
pub async fn user_by_whatsapp(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<WhatsappQuery>,
) -> Result<Json<WhatsappLookupResponse>, AppError> {
    let wa_id = present(query.wa_id).ok_or_else(|| AppError::missing(&["wa_id"]))?;

    let contato = ContatoRepo::new(state.store.clone())
        .find_by_wa_id(&wa_id)
        .await?;

    let response = match contato {
        Some(contato) => WhatsappLookupResponse {
            success: true,
            found: true,
            message: None,
            data: Some(contato),
        },
        None => WhatsappLookupResponse {
            success: true,
            found: false,
            message: Some(NOT_LINKED.to_string()),
            data: None,
        },
    };

    Ok(Json(response))
}
