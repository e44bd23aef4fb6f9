// src/handlers/updates.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError,
    handlers::dispatch,
    messenger::Outbox,
    models::update::{InboundUpdate, UpdateResponse},
    state::AppState,
};

/// Receives one update from the transport bridge.
/// The response lists the actions the bridge must perform, in order.
pub async fn receive_update(
    State(state): State<AppState>,
    Json(update): Json<InboundUpdate>,
) -> Result<Json<UpdateResponse>, AppError> {
    let outbox = Outbox::new();
    dispatch::handle_update(&state, &outbox, update).await?;

    Ok(Json(UpdateResponse {
        actions: outbox.into_actions(),
    }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
