use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Announcement {
    pub announcement_id: i32,
    pub title: String,
    pub content: String,
}
