use std::sync::Arc;

use crate::error::AppError;
use crate::server::AppState;
use crate::utils::jwt::{generate_token, Role, ADMIN_FLAT_NO};

pub struct AuthService {
    state: Arc<AppState>,
}

impl AuthService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn login_admin(&self, password: &str) -> Result<String, AppError> {
        if password.is_empty() || password != self.state.config.auth.admin_password {
            return Err(AppError::PasswordMismatch);
        }

        self.issue_token(ADMIN_FLAT_NO, Role::Admin, "")
    }

    pub async fn login_user(&self, flat_no: i32, mail: &str, password: &str) -> Result<String, AppError> {
        // 从数据库获取住户
        let flat = self
            .state
            .flats
            .find_by_mail(mail)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // 验证户号和密码
        let stored_password = if flat.password.is_empty() {
            String::new()
        } else {
            self.state.cipher.decrypt(&flat.password)?
        };

        if flat.flat_no != flat_no || stored_password.is_empty() || stored_password != password {
            return Err(AppError::InvalidCredentials);
        }

        self.issue_token(flat_no, Role::User, mail)
    }

    fn issue_token(&self, flat_no: i32, role: Role, email: &str) -> Result<String, AppError> {
        let auth = &self.state.config.auth;
        let token = generate_token(
            flat_no,
            role,
            email,
            auth.jwt_secret.as_bytes(),
            auth.token_expiry_hours,
        )?;

        Ok(token)
    }
}
