//! Obras relay
//!
//! A small Axum server sitting between chat clients (a WhatsApp bot, an
//! agent) and the PostgREST data store holding projects and expenses:
//! - API-key protected REST endpoints to create and list rows
//! - Monthly expense summaries aggregated in memory
//! - A question endpoint that reads the month and project out of free text
//! - WhatsApp account to user linking

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repo;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use config::Config;
use repo::StoreClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Settings loaded at startup.
    pub config: Arc<Config>,
    /// Client for the remote data store.
    pub store: StoreClient,
}

impl AppState {
    /// Builds the state, creating a store client from `config`.
    pub fn new(config: Config) -> Self {
        let store = StoreClient::new(&config.store_url, &config.store_key);
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

/// Builds the application router.
///
/// Everything except the health check sits behind the `x-api-key` guard.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/criar-gasto", post(api::gastos::create_gasto))
        .route("/criar-obra", post(api::obras::create_obra))
        .route("/obras", get(api::obras::list_obras))
        .route("/gastos", get(api::gastos::list_gastos))
        .route("/resumo-mes", get(api::gastos::month_summary))
        .route("/pergunta", post(api::pergunta::ask))
        .route("/vincular-whatsapp", post(api::whatsapp::link_whatsapp))
        .route("/usuario-por-whatsapp", get(api::whatsapp::user_by_whatsapp))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ));

    Router::new()
        .route("/", get(api::health::health))
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::timing_layer,
        ))
        .with_state(state)
}
