use async_trait::async_trait;
use serde::Deserialize;

use crate::config::PaymentConfig;
use crate::domain::payment::{TokenRequest, SUCCESS_STATUS};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// 提交已签名的请求，成功时返回网关 token
    async fn request_token(&self, request: &TokenRequest) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    status: Option<String>,
    token: Option<String>,
}

pub struct PaytrClient {
    client: reqwest::Client,
    gateway_url: String,
}

impl PaytrClient {
    pub fn new(client: reqwest::Client, config: &PaymentConfig) -> Self {
        Self {
            client,
            gateway_url: config.gateway_url.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for PaytrClient {
    async fn request_token(&self, request: &TokenRequest) -> AppResult<String> {
        let response = self
            .client
            .post(&self.gateway_url)
            .form(request)
            .send()
            .await?;

        let body = response.text().await?;

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::PaymentGateway(format!("decode response body error: {}", e))
        })?;

        if parsed.status.as_deref() != Some(SUCCESS_STATUS) {
            return Err(AppError::PaymentGateway(format!("status not ok: {}", body)));
        }

        parsed
            .token
            .ok_or_else(|| AppError::PaymentGateway("there is no token in response".to_string()))
    }
}
