//! Shared error types for the services crate.

use thiserror::Error;

use datapath_core::model::{ContentError, ProgressError, SessionValidationError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `BackendApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// 401 or 403: the session is missing, expired or revoked.
    #[error("not authenticated")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    /// Any other 4xx; the body usually carries the backend's reason.
    #[error("request rejected with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("malformed backend payload: {0}")]
    Decode(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<ProgressError> for ApiError {
    fn from(err: ProgressError) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<SessionValidationError> for ApiError {
    fn from(err: SessionValidationError) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Errors emitted by `ApiConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("session lifetime must be a whole number of days >= 1, got {0:?}")]
    InvalidSessionTtl(String),
}

/// Errors emitted by the session resolver and route guard.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no session id in callback fragment")]
    MissingSessionId,
    #[error("session exchange already in flight")]
    DuplicateExchange,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Invalid(#[from] SessionValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ContentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ContentServiceError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            ContentServiceError::Api(err) => err.is_not_found(),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
