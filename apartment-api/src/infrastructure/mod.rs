pub mod database;
pub mod mail;
pub mod payment;

use std::time::Duration;

use crate::config::HttpClientConfig;
use crate::error::AppError;

/// 对外 HTTP 调用共用的客户端，带超时
pub fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    Ok(client)
}
