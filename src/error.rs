use sea_orm::SqlErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")] Validation(String),

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("{0} not found")] NotFound(&'static str),

    #[error("Forbidden: {0}")] Forbidden(String),

    #[error("Unauthorized: {0}")] Unauthorized(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Invalid state transition: {0}")] InvalidStateTransition(String),

    #[error("Mail error: {0}")] Mail(String),

    #[error("Storage error: {0}")] Storage(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn to_error_response(&self) -> ErrorResponse {
        let (code, message) = match self {
            AppError::Database(sea_orm::DbErr::RecordNotFound(what)) =>
                ("NOT_FOUND", format!("{} not found", what)),
            AppError::Database(e) =>
                match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) =>
                        ("CONSTRAINT_VIOLATION", "Resource already exists".to_string()),
                    Some(SqlErr::ForeignKeyConstraintViolation(_)) =>
                        ("CONSTRAINT_VIOLATION", "Related resource does not exist".to_string()),
                    _ => ("DATABASE_ERROR", e.to_string()),
                }
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::InvalidInput(msg) => ("INVALID_INPUT", msg.clone()),
            AppError::NotFound(what) => ("NOT_FOUND", format!("{} not found", what)),
            AppError::Forbidden(msg) => ("FORBIDDEN", msg.clone()),
            AppError::Unauthorized(msg) => ("UNAUTHORIZED", msg.clone()),
            AppError::EmailTaken => ("EMAIL_TAKEN", "Email already registered".to_string()),
            AppError::InsufficientFunds =>
                ("INSUFFICIENT_FUNDS", "Insufficient funds for this operation".to_string()),
            AppError::InvalidStateTransition(msg) => ("INVALID_STATE", msg.clone()),
            AppError::Mail(msg) => ("MAIL_ERROR", msg.clone()),
            AppError::Storage(msg) => ("STORAGE_ERROR", msg.clone()),
            AppError::Config(msg) => ("CONFIG_ERROR", msg.clone()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        ErrorResponse {
            error: code.to_string(),
            message,
        }
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::EmailTaken => StatusCode::CONFLICT,
            | AppError::Validation(_)
            | AppError::InvalidInput(_)
            | AppError::InsufficientFunds
            | AppError::InvalidStateTransition(_) => StatusCode::BAD_REQUEST,
            AppError::Database(sea_orm::DbErr::RecordNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Database(e) =>
                match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => StatusCode::BAD_REQUEST,
                    Some(SqlErr::ForeignKeyConstraintViolation(_)) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                }
            AppError::Mail(_) | AppError::Storage(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let response = self.to_error_response();
        (status, axum::Json(response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
