use thiserror::Error;

use crate::scheduling::Rejection;

#[derive(Error, Debug)]
pub enum CarportError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Scheduling(#[from] Rejection),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CarportError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        CarportError::NotFound(format!("{} with ID {} not found", entity, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CarportError::Validation(message.into())
    }
}

pub type CarportResult<T> = Result<T, CarportError>;
