use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use super::{parse_flat_no, MessageResponse};
use crate::domain::services::flat_service::FlatService;
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/flat/{flatNo}/dues", post(add_dues).delete(delete_dues))
}

async fn add_dues(
    State(state): State<Arc<AppState>>,
    Path(flat_no): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let flat_no = parse_flat_no(&flat_no)?;
    FlatService::new(state).add_dues(flat_no).await?;
    Ok(Json(MessageResponse::ok()))
}

async fn delete_dues(
    State(state): State<Arc<AppState>>,
    Path(flat_no): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let flat_no = parse_flat_no(&flat_no)?;
    FlatService::new(state).delete_dues(flat_no).await?;
    Ok(Json(MessageResponse::ok()))
}
