use axum::{
    extract::{rejection::FormRejection, State},
    routing::post,
    Extension, Form, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use crate::domain::payment::CallbackNotification;
use crate::domain::services::payment_service::{PaymentDetails, PaymentService};
use crate::error::AppError;
use crate::middleware::client_ip::ClientIp;
use crate::server::AppState;
use crate::utils::jwt::Claims;

pub fn token_routes() -> Router<Arc<AppState>> {
    Router::new().route("/payment/token", post(request_token))
}

pub fn callback_routes() -> Router<Arc<AppState>> {
    Router::new().route("/payment/callback", post(callback))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentTokenRequest {
    #[validate(length(min = 1, message = "user_name is required"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "user_address is required"))]
    pub user_address: String,
    #[validate(length(min = 1, message = "user_phone is required"))]
    pub user_phone: String,
    #[validate(length(min = 1, message = "user_basket is required"))]
    pub user_basket: Vec<Vec<Value>>,
    #[validate(length(min = 1, message = "debug_on is required"))]
    pub debug_on: String,
    #[validate(length(min = 1, message = "test_mode is required"))]
    pub test_mode: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentTokenResponse {
    pub token: String,
}

async fn request_token(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ClientIp(user_ip): ClientIp,
    WithRejection(Json(payload), _): WithRejection<Json<PaymentTokenRequest>, AppError>,
) -> Result<Json<PaymentTokenResponse>, AppError> {
    payload.validate()?;

    let details = PaymentDetails {
        user_name: payload.user_name,
        user_address: payload.user_address,
        user_phone: payload.user_phone,
        user_basket: payload.user_basket,
        debug_on: payload.debug_on,
        test_mode: payload.test_mode,
    };

    // 邮箱取自会话令牌
    let token = PaymentService::new(state)
        .request_token(&claims.email, &user_ip, details)
        .await?;

    Ok(Json(PaymentTokenResponse { token }))
}

/// 网关回调，始终以纯文本应答
async fn callback(
    State(state): State<Arc<AppState>>,
    form: Result<Form<CallbackNotification>, FormRejection>,
) -> String {
    // 无法解析的表单按空字段处理，会在签名校验处被拒绝
    let notification = match form {
        Ok(Form(notification)) => notification,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed payment notification");
            CallbackNotification::default()
        }
    };

    PaymentService::new(state)
        .handle_callback(&notification)
        .await
        .response_text()
}
