use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Duration;

use datapath_core::Clock;
use datapath_core::model::Session;
use storage::repository::SessionRepository;

use crate::api::BackendApi;
use crate::error::SessionError;
use crate::notify::Notification;

const SESSION_ID_KEY: &str = "session_id=";

/// Pull the one-time session id out of a redirect fragment such as
/// `#session_id=abc&state=x`.
///
/// Returns `None` when the key is absent or its value is empty.
#[must_use]
pub fn parse_session_fragment(fragment: &str) -> Option<&str> {
    let start = fragment.find(SESSION_ID_KEY)? + SESSION_ID_KEY.len();
    let rest = &fragment[start..];
    let value = rest.split('&').next().unwrap_or(rest).trim();
    (!value.is_empty()).then_some(value)
}

/// Where the callback screen sends the user next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Exchange succeeded and the session is cached.
    Dashboard {
        session: Session,
        notification: Notification,
    },
    /// Exchange failed or there was nothing to exchange.
    Landing { notification: Option<Notification> },
    /// The same id is already being exchanged; wait for that attempt.
    Pending,
}

/// Turns a login redirect into a cached `Session`, and tears it down again
/// on logout.
#[derive(Clone)]
pub struct SessionResolver {
    clock: Clock,
    ttl: Duration,
    api: Arc<dyn BackendApi>,
    sessions: Arc<dyn SessionRepository>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Removes a session id from the in-flight set when the exchange ends.
struct InFlight {
    id: String,
    set: Arc<Mutex<HashSet<String>>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

impl SessionResolver {
    #[must_use]
    pub fn new(
        clock: Clock,
        ttl: Duration,
        api: Arc<dyn BackendApi>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            clock,
            ttl,
            api,
            sessions,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Handle a redirect fragment end to end.
    ///
    /// Never fails: every error becomes a `Landing` outcome with a
    /// notification, and nothing is cached in that case.
    pub async fn resolve_fragment(&self, fragment: &str) -> AuthOutcome {
        let Some(session_id) = parse_session_fragment(fragment) else {
            tracing::debug!("callback without session id");
            return AuthOutcome::Landing { notification: None };
        };

        match self.exchange(session_id).await {
            Ok(session) => AuthOutcome::Dashboard {
                session,
                notification: Notification::signed_in(),
            },
            Err(SessionError::DuplicateExchange) => AuthOutcome::Pending,
            Err(err) => {
                tracing::warn!(error = %err, "session exchange failed");
                AuthOutcome::Landing {
                    notification: Some(Notification::sign_in_failed()),
                }
            }
        }
    }

    /// Exchange `session_id` once and cache the resulting session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::DuplicateExchange` if the same id is already
    /// being exchanged, otherwise any API, validation or storage failure.
    pub async fn exchange(&self, session_id: &str) -> Result<Session, SessionError> {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return Err(SessionError::MissingSessionId);
        }
        let _guard = self.claim(session_id)?;

        let grant = self.api.exchange_session(session_id).await?;
        let session = Session::issue(grant.user, grant.token, self.clock.now(), self.ttl)?;
        self.sessions.save_session(&session).await?;

        tracing::info!(user = %session.user().id(), "signed in");
        Ok(session)
    }

    fn claim(&self, session_id: &str) -> Result<InFlight, SessionError> {
        let mut set = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(session_id.to_owned()) {
            tracing::debug!("ignoring duplicate session exchange");
            return Err(SessionError::DuplicateExchange);
        }
        Ok(InFlight {
            id: session_id.to_owned(),
            set: Arc::clone(&self.in_flight),
        })
    }

    /// Revoke `session` on the server and forget it locally.
    ///
    /// On failure the cached session is kept so the user stays signed in.
    pub async fn logout(&self, session: &Session) -> Notification {
        if let Err(err) = self.api.logout(session.token()).await {
            tracing::warn!(error = %err, "logout failed");
            return Notification::sign_out_failed();
        }
        if let Err(err) = self.sessions.clear_session().await {
            tracing::warn!(error = %err, "could not clear cached session");
        }
        tracing::info!(user = %session.user().id(), "signed out");
        Notification::signed_out()
    }
}
