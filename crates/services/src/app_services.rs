use std::sync::Arc;

use chrono::Duration;
use storage::repository::Storage;

use crate::Clock;
use crate::api::{BackendApi, HttpBackend};
use crate::auth::{RouteGuard, SessionResolver};
use crate::config::ApiConfig;
use crate::content_service::ContentService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one backend and one session cache.
#[derive(Clone)]
pub struct AppServices {
    session_resolver: Arc<SessionResolver>,
    route_guard: Arc<RouteGuard>,
    content: Arc<ContentService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services talking HTTP to `config`'s backend, caching the
    /// session in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        config: ApiConfig,
        db_url: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let ttl = config.session_ttl();
        tracing::info!(api = %config.base_url(), "using backend");
        let api: Arc<dyn BackendApi> = Arc::new(HttpBackend::new(config));
        Ok(Self::from_parts(api, storage, clock, ttl))
    }

    /// Build services over an arbitrary backend and storage.
    #[must_use]
    pub fn from_parts(
        api: Arc<dyn BackendApi>,
        storage: Storage,
        clock: Clock,
        session_ttl: Duration,
    ) -> Self {
        let session_resolver = Arc::new(SessionResolver::new(
            clock,
            session_ttl,
            Arc::clone(&api),
            Arc::clone(&storage.sessions),
        ));
        let route_guard = Arc::new(RouteGuard::new(
            clock,
            session_ttl,
            Arc::clone(&api),
            Arc::clone(&storage.sessions),
        ));
        let content = Arc::new(ContentService::new(Arc::clone(&api)));
        let progress = Arc::new(ProgressService::new(api));

        Self {
            session_resolver,
            route_guard,
            content,
            progress,
        }
    }

    #[must_use]
    pub fn session_resolver(&self) -> Arc<SessionResolver> {
        Arc::clone(&self.session_resolver)
    }

    #[must_use]
    pub fn route_guard(&self) -> Arc<RouteGuard> {
        Arc::clone(&self.route_guard)
    }

    #[must_use]
    pub fn content(&self) -> Arc<ContentService> {
        Arc::clone(&self.content)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
