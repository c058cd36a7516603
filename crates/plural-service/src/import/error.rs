//! Import error types

use plural_common::AppError;
use plural_core::DomainError;
use thiserror::Error;

use crate::services::ServiceError;

/// Errors that end an import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import cancelled")]
    Cancelled,

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("could not decode member list: {0}")]
    Decode(String),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    InvalidAvatar(DomainError),

    #[error("could not store members: {0}")]
    Store(#[from] ServiceError),
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Cancelled => AppError::Cancelled,
            ImportError::InvalidIdentifier(msg) => AppError::Validation(msg),
            ImportError::Store(e) => AppError::from(e),
            other => AppError::Import(other.to_string()),
        }
    }
}
