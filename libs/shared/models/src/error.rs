use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text placed in the `message` field of the failure envelope.
    pub fn message(&self) -> &str {
        match self {
            AppError::Auth(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::Database(msg)
            | AppError::Timeout(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    pub fn is_server_side(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::Timeout(_) | AppError::Internal(_)
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

// Failures travel in the body; the status line always stays 200.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_side() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "success": false,
            "message": self.message()
        }));

        (StatusCode::OK, body).into_response()
    }
}
