use std::sync::Arc;

use crate::error::AppError;
use crate::infrastructure::mail::MailMessage;
use crate::server::AppState;

pub struct MailService {
    state: Arc<AppState>,
}

impl MailService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn send(&self, message: MailMessage) -> Result<(), AppError> {
        self.state.mail_sender.send(&message).await?;
        tracing::info!(to = %message.to_mail, "Mail sent");
        Ok(())
    }
}
