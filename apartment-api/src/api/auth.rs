use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar},
    WithRejection,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;
use crate::middleware::auth::AUTH_COOKIE;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/login", post(admin_login))
        .route("/user/login", post(user_login))
        .route("/logout", post(logout))
}

/// 空密码不在此拒绝，按凭证不符处理
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserLoginRequest {
    #[validate(range(min = 1, message = "flat_no must be a positive integer"))]
    pub flat_no: i32,
    #[validate(email(message = "Invalid email format"))]
    pub mail: String,
    pub password: String,
}

fn session_cookie(token: String, expiry_hours: u64) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::hours(expiry_hours as i64))
        .build()
}

async fn admin_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<AdminLoginRequest>, AppError>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let token = AuthService::new(state.clone()).login_admin(&payload.password)?;
    let cookie = session_cookie(token, state.config.auth.token_expiry_hours);

    Ok((jar.add(cookie), Json(MessageResponse::ok())))
}

async fn user_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<UserLoginRequest>, AppError>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    // 验证请求
    payload.validate()?;

    let token = AuthService::new(state.clone())
        .login_user(payload.flat_no, &payload.mail, &payload.password)
        .await?;
    let cookie = session_cookie(token, state.config.auth.token_expiry_hours);

    Ok((jar.add(cookie), Json(MessageResponse::ok())))
}

async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    // 无论请求是否带 cookie 都下发过期 cookie
    let mut cookie = Cookie::build((AUTH_COOKIE, "")).http_only(true).path("/").build();
    cookie.make_removal();

    (jar.add(cookie), Json(MessageResponse::new("logout successful")))
}
