use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::domain::models::Announcement;
use crate::domain::services::announcement_service::AnnouncementService;
use crate::error::AppError;
use crate::server::AppState;

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/announcement", post(create_announcement))
}

pub fn member_routes() -> Router<Arc<AppState>> {
    Router::new().route("/announcement", get(list_announcements))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnnouncementRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

async fn create_announcement(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<AnnouncementRequest>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;
    AnnouncementService::new(state)
        .create(&payload.title, &payload.content)
        .await?;
    Ok(Json(MessageResponse::ok()))
}

async fn list_announcements(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    let announcements = AnnouncementService::new(state).list().await?;
    Ok(Json(announcements))
}
