use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::domain::services::mail_service::MailService;
use crate::error::AppError;
use crate::infrastructure::mail::MailMessage;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/sendmail", post(send_mail))
}

#[derive(Debug, Deserialize, Validate)]
pub struct MailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub to_mail: String,
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "body is required"))]
    pub body: String,
}

async fn send_mail(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<MailRequest>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    MailService::new(state)
        .send(MailMessage {
            to_mail: payload.to_mail,
            subject: payload.subject,
            body: payload.body,
        })
        .await?;

    Ok(Json(MessageResponse::ok()))
}
