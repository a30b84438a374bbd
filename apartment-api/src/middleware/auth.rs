use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::error::AppError;
use crate::server::AppState;
use crate::utils::jwt::{verify_token, Role};

/// 会话令牌所在的 cookie
pub const AUTH_COOKIE: &str = "Authentication";

pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &jar, request, next, &[Role::Admin]).await
}

pub async fn require_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &jar, request, next, &[Role::User]).await
}

pub async fn require_member(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &jar, request, next, &[Role::Admin, Role::User]).await
}

async fn authorize(
    state: &AppState,
    jar: &CookieJar,
    mut request: Request,
    next: Next,
    allowed: &[Role],
) -> Result<Response, AppError> {
    // 从 cookie 获取令牌
    let token = jar
        .get(AUTH_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing JWT token".to_string()))?;

    // 验证令牌，签名错误和过期统一按未授权处理
    let claims = verify_token(token, state.config.auth.jwt_secret.as_bytes()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::Unauthorized("Invalid JWT".to_string())
    })?;

    if !allowed.contains(&claims.role) {
        return Err(AppError::Unauthorized("Insufficient permissions".to_string()));
    }

    // 将令牌内容添加到请求扩展中
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
