use axum::{
    extract::{ConnectInfo, FromRef, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::server::AppState;

const FORWARDED_FOR: &str = "x-forwarded-for";
const FALLBACK_IP: &str = "127.0.0.1";

/// 客户端 IP: 取连接地址；开启 `http.trust_forwarded_for` 时优先取 `X-Forwarded-For` 的第一跳
#[derive(Debug, Clone, PartialEq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);

        if app_state.config.http.trust_forwarded_for {
            let forwarded = parts
                .headers
                .get(FORWARDED_FOR)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(str::trim)
                .filter(|value| !value.is_empty());

            if let Some(ip) = forwarded {
                return Ok(ClientIp(ip.to_string()));
            }
        }

        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| FALLBACK_IP.to_string());

        Ok(ClientIp(ip))
    }
}
