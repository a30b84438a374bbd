use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::models::Announcement;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, title: &str, content: &str) -> AppResult<Announcement>;
    async fn find_all(&self) -> AppResult<Vec<Announcement>>;
}

pub struct MySqlAnnouncementRepository {
    pool: MySqlPool,
}

impl MySqlAnnouncementRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for MySqlAnnouncementRepository {
    async fn create(&self, title: &str, content: &str) -> AppResult<Announcement> {
        let result = sqlx::query("INSERT INTO announcements (title, content) VALUES (?, ?)")
            .bind(title)
            .bind(content)
            .execute(&self.pool)
            .await?;

        Ok(Announcement {
            announcement_id: result.last_insert_id() as i32,
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    async fn find_all(&self) -> AppResult<Vec<Announcement>> {
        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT announcement_id, title, content FROM announcements ORDER BY announcement_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }
}
