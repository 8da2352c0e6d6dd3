//! Typed access to the DataPath Hub REST API.

mod http;
mod wire;

use async_trait::async_trait;

use datapath_core::model::{
    ContentItem, ContentKind, ItemId, ProgressRecord, ProgressUpsert, SessionToken, User,
    UserStats,
};

use crate::error::ApiError;

pub use http::HttpBackend;

/// What a successful session exchange hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub user: User,
    pub token: SessionToken,
}

/// Backend operations used by the services.
///
/// Implemented over HTTP by `HttpBackend`; tests substitute in-memory fakes.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Trade a one-time session id from the login redirect for a session token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when the id is rejected.
    async fn exchange_session(&self, session_id: &str) -> Result<SessionGrant, ApiError>;

    /// Resolve the user behind `token`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when the token is not (or no longer) valid.
    async fn current_user(&self, token: &SessionToken) -> Result<User, ApiError>;

    /// Invalidate `token` server-side.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn logout(&self, token: &SessionToken) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the payload is malformed.
    async fn stats(&self, token: &SessionToken) -> Result<UserStats, ApiError>;

    /// Whole catalog of one kind, in server order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or an item is malformed.
    async fn list_items(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id.
    async fn get_item(&self, kind: ContentKind, id: &ItemId) -> Result<ContentItem, ApiError>;

    /// Every progress record of the signed-in user, both kinds.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or a record is malformed.
    async fn list_progress(&self, token: &SessionToken) -> Result<Vec<ProgressRecord>, ApiError>;

    /// Write a full record and return what the server stored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the backend rejects the write.
    async fn upsert_progress(
        &self,
        token: &SessionToken,
        upsert: &ProgressUpsert,
    ) -> Result<ProgressRecord, ApiError>;
}
