use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::{Value, json};

use crate::core::error::AppError;
use crate::features::relay::helpers::parse_status_update;
use crate::server::AppState;

/// Decodes the body regardless of `Content-Type`; callers often omit it.
pub async fn handle_send(State(state): State<AppState>, body: Bytes) -> Result<String, AppError> {
    let update = parse_status_update(&body)?;
    let name = state.relay.relay(update).await?;
    Ok(format!("Sent: {name}"))
}

pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn handle_healthcheck() -> Result<Json<Value>, AppError> {
    Ok(Json(json!({ "status": "ok" })))
}
