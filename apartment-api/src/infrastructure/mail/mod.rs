use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use crate::config::MailConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to_mail: String,
    pub subject: String,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}

/// 邮件中继的请求体
#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    from_name: &'a str,
    from_email: &'a str,
    to_name: &'a str,
    to_email: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// 通过 HTTP 邮件中继发信，一次 POST，不重试
pub struct HttpMailSender {
    client: reqwest::Client,
    server_url: String,
    from_mail: String,
    from_name: String,
}

impl HttpMailSender {
    pub fn new(client: reqwest::Client, config: &MailConfig) -> Self {
        Self {
            client,
            server_url: config.server_url.clone(),
            from_mail: config.from_mail.clone(),
            from_name: config.from_name.clone(),
        }
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let request = RelayRequest {
            from_name: &self.from_name,
            from_email: &self.from_mail,
            to_name: "-",
            to_email: &message.to_mail,
            subject: &message.subject,
            html: &message.body,
        };

        tracing::debug!(to = %message.to_mail, subject = %message.subject, "Sending mail");

        let response = self
            .client
            .post(&self.server_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = %status, "Mail relay rejected message");
            return Err(AppError::SendMail(format!("mail relay responded with {}", status)));
        }

        Ok(())
    }
}
