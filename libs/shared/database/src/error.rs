use std::time::Duration;

use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(_) => AppError::Timeout(err.to_string()),
            StoreError::Backend(msg) => AppError::Database(msg),
            StoreError::Serialization(msg) => AppError::Internal(msg),
        }
    }
}
