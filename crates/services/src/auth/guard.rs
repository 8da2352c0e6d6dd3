use std::sync::Arc;

use chrono::Duration;

use datapath_core::Clock;
use datapath_core::model::Session;
use storage::repository::SessionRepository;

use crate::api::BackendApi;

/// Result of a protected-route entry check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted(Session),
    /// Redirect to the landing page. Never carries an error for the user.
    Denied,
}

impl Access {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Access::Granted(session) => Some(session),
            Access::Denied => None,
        }
    }
}

/// Decides whether a protected route may render.
///
/// A cached session inside its lifetime is trusted as is. Past its expiry
/// the token gets one round trip to the backend; success renews the session,
/// failure clears it.
#[derive(Clone)]
pub struct RouteGuard {
    clock: Clock,
    ttl: Duration,
    api: Arc<dyn BackendApi>,
    sessions: Arc<dyn SessionRepository>,
}

impl RouteGuard {
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
        }
    }

    pub async fn check(&self) -> Access {
        let cached = match self.sessions.load_session().await {
            Ok(cached) => cached,
            Err(err) => {
                tracing::warn!(error = %err, "could not read cached session");
                None
            }
        };
        let Some(cached) = cached else {
            return Access::Denied;
        };

        let now = self.clock.now();
        if cached.is_valid_at(now) {
            return Access::Granted(cached);
        }

        match self.api.current_user(cached.token()).await {
            Ok(user) => match cached.renew(user, now, self.ttl) {
                Ok(renewed) => {
                    if let Err(err) = self.sessions.save_session(&renewed).await {
                        tracing::warn!(error = %err, "could not store renewed session");
                    }
                    tracing::debug!(user = %renewed.user().id(), "session renewed");
                    Access::Granted(renewed)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "could not renew session");
                    Access::Denied
                }
            },
            Err(err) if err.is_unauthorized() => {
                tracing::info!(error = %err, "cached session rejected");
                if let Err(err) = self.sessions.clear_session().await {
                    tracing::warn!(error = %err, "could not clear cached session");
                }
                Access::Denied
            }
            // Keep the session; the next route entry asks again.
            Err(err) => {
                tracing::warn!(error = %err, "could not revalidate session");
                Access::Denied
            }
        }
    }
}
