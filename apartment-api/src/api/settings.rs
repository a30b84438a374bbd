use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::domain::services::dues_service::DuesService;
use crate::error::AppError;
use crate::server::AppState;

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/flat/dues/price", put(change_price))
        .route("/flat/payday", put(change_pay_day))
}

pub fn member_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/config/dues/price", get(get_price))
        .route("/config/payday", get(get_pay_day))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePriceRequest {
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct ChangePayDayRequest {
    pub payday: i64,
}

#[derive(Debug, Serialize)]
pub struct DuesPriceResponse {
    pub dues_price: f64,
}

#[derive(Debug, Serialize)]
pub struct PayDayResponse {
    pub payday: u32,
}

async fn change_price(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<ChangePriceRequest>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;
    DuesService::new(state).change_price(payload.price)?;
    Ok(Json(MessageResponse::ok()))
}

async fn change_pay_day(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<ChangePayDayRequest>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    let pay_day = u32::try_from(payload.payday).map_err(|_| AppError::PayDayRange)?;
    DuesService::new(state).change_pay_day(pay_day)?;
    Ok(Json(MessageResponse::ok()))
}

async fn get_price(State(state): State<Arc<AppState>>) -> Json<DuesPriceResponse> {
    Json(DuesPriceResponse {
        dues_price: DuesService::new(state).settings().price,
    })
}

async fn get_pay_day(State(state): State<Arc<AppState>>) -> Json<PayDayResponse> {
    Json(PayDayResponse {
        payday: DuesService::new(state).settings().pay_day,
    })
}
