use std::sync::Arc;

use crate::domain::models::Announcement;
use crate::error::AppError;
use crate::server::AppState;

pub struct AnnouncementService {
    state: Arc<AppState>,
}

impl AnnouncementService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn create(&self, title: &str, content: &str) -> Result<Announcement, AppError> {
        let announcement = self.state.announcements.create(title, content).await?;
        tracing::info!(announcement_id = announcement.announcement_id, "Announcement created");
        Ok(announcement)
    }

    pub async fn list(&self) -> Result<Vec<Announcement>, AppError> {
        self.state.announcements.find_all().await
    }
}
