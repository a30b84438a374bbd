use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::{parse_flat_no, MessageResponse};
use crate::domain::models::{Flat, FlatOwner};
use crate::domain::services::flat_service::FlatService;
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/flat", get(list_flats).put(set_owner))
        .route(
            "/flat/{flatNo}",
            post(create_flat).get(get_flat).delete(delete_flat),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct FlatOwnerRequest {
    #[validate(range(min = 1, message = "flat_no must be a positive integer"))]
    pub flat_no: i32,
    #[validate(length(min = 2, message = "owner_name must be at least 2 characters"))]
    pub owner_name: String,
    #[validate(length(min = 2, message = "owner_surname must be at least 2 characters"))]
    pub owner_surname: String,
    #[validate(email(message = "Invalid email format"))]
    pub mail: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(range(min = 0, message = "dues_count must not be negative"))]
    pub dues_count: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct FlatResponse {
    pub flat_no: i32,
    pub owner_name: String,
    pub owner_surname: String,
    pub mail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub dues_count: i32,
}

impl FlatResponse {
    fn with_password(flat: Flat) -> Self {
        Self {
            flat_no: flat.flat_no,
            owner_name: flat.owner_name,
            owner_surname: flat.owner_surname,
            mail: flat.mail.unwrap_or_default(),
            password: Some(flat.password),
            dues_count: flat.dues_count,
        }
    }

    fn without_password(flat: Flat) -> Self {
        Self {
            password: None,
            ..Self::with_password(flat)
        }
    }
}

async fn create_flat(
    State(state): State<Arc<AppState>>,
    Path(flat_no): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let flat_no = parse_flat_no(&flat_no)?;
    FlatService::new(state).create_flat(flat_no).await?;
    Ok(Json(MessageResponse::ok()))
}

async fn set_owner(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<FlatOwnerRequest>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    // 验证请求
    payload.validate()?;

    let owner = FlatOwner {
        flat_no: payload.flat_no,
        owner_name: payload.owner_name,
        owner_surname: payload.owner_surname,
        mail: payload.mail,
        password: payload.password,
        dues_count: payload.dues_count,
    };
    FlatService::new(state).set_owner(owner).await?;

    Ok(Json(MessageResponse::ok()))
}

async fn delete_flat(
    State(state): State<Arc<AppState>>,
    Path(flat_no): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let flat_no = parse_flat_no(&flat_no)?;
    FlatService::new(state).delete_flat(flat_no).await?;
    Ok(Json(MessageResponse::ok()))
}

async fn get_flat(
    State(state): State<Arc<AppState>>,
    Path(flat_no): Path<String>,
) -> Result<Json<FlatResponse>, AppError> {
    let flat_no = parse_flat_no(&flat_no)?;
    let expose_password = state.config.auth.expose_tenant_password;

    let flat = FlatService::new(state).get_flat(flat_no).await?;
    let response = if expose_password {
        FlatResponse::with_password(flat)
    } else {
        FlatResponse::without_password(flat)
    };

    Ok(Json(response))
}

async fn list_flats(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FlatResponse>>, AppError> {
    let flats = FlatService::new(state).list_flats().await?;
    Ok(Json(flats.into_iter().map(FlatResponse::without_password).collect()))
}
