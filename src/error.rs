use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Auth errors
    #[error("Unauthorized")]
    Unauthorized,

    // Allocation errors
    #[error("Imei not found")]
    ImeiNotFound,
    #[error("No more promo codes in DB")]
    CodesExhausted,

    // Validation errors
    #[error("{0}")]
    Validation(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Mail errors
    #[error("Mail transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Mail message error: {0}")]
    MailMessage(#[from] lettre::error::Error),
    #[error("Mail address error: {0}")]
    MailAddress(#[from] lettre::address::AddressError),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // 400 Bad Request
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // 401 Unauthorized
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),

            // 404 Not Found
            AppError::ImeiNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            // 503 Service Unavailable
            AppError::CodesExhausted => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),

            // 500 Internal Server Error
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Smtp(e) => {
                tracing::error!("Mail transport error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Mail error".to_string())
            }
            AppError::MailMessage(e) => {
                tracing::error!("Mail message error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Mail error".to_string())
            }
            AppError::MailAddress(e) => {
                tracing::error!("Mail address error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Mail error".to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": false,
            "message": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
