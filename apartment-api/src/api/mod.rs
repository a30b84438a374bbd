pub mod announcements;
pub mod auth;
pub mod dues;
pub mod flats;
pub mod mail;
pub mod payment;
pub mod settings;

use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn ok() -> Self {
        Self::new("status ok")
    }
}

/// 路径中的户号必须是正整数
pub(crate) fn parse_flat_no(raw: &str) -> Result<i32, AppError> {
    match raw.parse::<i32>() {
        Ok(flat_no) if flat_no > 0 => Ok(flat_no),
        _ => Err(AppError::BadRequest(format!(
            "flatNo must be a positive integer, got {:?}",
            raw
        ))),
    }
}
