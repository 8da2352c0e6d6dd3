use async_trait::async_trait;
use chrono::{DateTime, Utc};
use datapath_core::model::{Session, SessionToken, SessionValidationError, User, UserId};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the cached session.
///
/// Flat columns so adapters can store it without knowing about the domain
/// validation rules; `into_session` re-applies them on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let user = session.user();
        Self {
            user_id: user.id().as_str().to_owned(),
            email: user.email().to_owned(),
            name: user.name().to_owned(),
            picture: user.picture().map(str::to_owned),
            token: session.token().expose().to_owned(),
            issued_at: session.issued_at(),
            expires_at: session.expires_at(),
        }
    }

    /// Convert the record back into a domain `Session`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if any field fails domain validation.
    pub fn into_session(self) -> Result<Session, StorageError> {
        let user_id =
            UserId::new(self.user_id).map_err(|err| StorageError::Serialization(err.to_string()))?;
        let user = User::new(user_id, self.email, self.name, self.picture).map_err(ser)?;
        let token = SessionToken::new(self.token).map_err(ser)?;
        Session::from_persisted(user, token, self.issued_at, self.expires_at).map_err(ser)
    }
}

fn ser(err: SessionValidationError) -> StorageError {
    StorageError::Serialization(err.to_string())
}

/// Client-local store for the single signed-in session.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load the cached session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or the stored row is corrupt.
    async fn load_session(&self) -> Result<Option<Session>, StorageError>;

    /// Replace the cached session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn save_session(&self, session: &Session) -> Result<(), StorageError>;

    /// Forget the cached session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn clear_session(&self) -> Result<(), StorageError>;
}

/// In-memory session cache for tests and ephemeral runs.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    session: Arc<Mutex<Option<SessionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn load_session(&self) -> Result<Option<Session>, StorageError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clone().map(SessionRecord::into_session).transpose()
    }

    async fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(SessionRecord::from_session(session));
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let sessions: Arc<dyn SessionRepository> = Arc::new(InMemoryRepository::new());
        Self { sessions }
    }
}
