use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 服务内所有错误的统一类型，边界层按变体选择状态码
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("flat already exists")]
    FlatAlreadyExists,

    #[error("there is no flat")]
    FlatNotFound,

    #[error("there is no dues")]
    NoDues,

    #[error("mail address already belongs to another flat")]
    MailAlreadyInUse,

    #[error("invalid range: pay day must be between 1 and 28")]
    PayDayRange,

    #[error("invalid dues price")]
    InvalidPrice,

    #[error("password does not match")]
    PasswordMismatch,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("there is no merchant order")]
    MerchantOrderNotFound,

    #[error("send mail error: {0}")]
    SendMail(String),

    #[error("payment gateway error: {0}")]
    PaymentGateway(String),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cipher error: {0}")]
    Cipher(#[from] common::CryptoError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::Validation(_)
            | AppError::FlatAlreadyExists
            | AppError::NoDues
            | AppError::MailAlreadyInUse
            | AppError::PayDayRange
            | AppError::InvalidPrice => StatusCode::BAD_REQUEST,
            AppError::FlatNotFound | AppError::MerchantOrderNotFound => StatusCode::NOT_FOUND,
            AppError::PasswordMismatch
            | AppError::InvalidCredentials
            | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::SendMail(_) | AppError::PaymentGateway(_) | AppError::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Database(_)
            | AppError::Cipher(_)
            | AppError::Token(_)
            | AppError::Config(_)
            | AppError::Scheduler(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
