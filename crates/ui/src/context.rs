use std::sync::{Arc, Mutex, PoisonError};

use dioxus::prelude::*;

use datapath_core::model::Session;
use services::{ContentService, Notification, ProgressService, RouteGuard, SessionResolver};

use crate::platform::{DesktopLinkOpener, LinkOpenerRef};

pub trait UiApp: Send + Sync {
    fn session_resolver(&self) -> Arc<SessionResolver>;
    fn route_guard(&self) -> Arc<RouteGuard>;
    fn content(&self) -> Arc<ContentService>;
    fn progress(&self) -> Arc<ProgressService>;

    /// Redirect fragment handed to the process at launch, if any.
    fn launch_callback(&self) -> Option<String> {
        None
    }
}

#[derive(Clone)]
pub struct AppContext {
    session_resolver: Arc<SessionResolver>,
    route_guard: Arc<RouteGuard>,
    content: Arc<ContentService>,
    progress: Arc<ProgressService>,
    pending_callback: Arc<Mutex<Option<String>>>,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self::with_link_opener(app, Arc::new(DesktopLinkOpener))
    }

    #[must_use]
    pub fn with_link_opener(app: &Arc<dyn UiApp>, link_opener: LinkOpenerRef) -> Self {
        Self {
            session_resolver: app.session_resolver(),
            route_guard: app.route_guard(),
            content: app.content(),
            progress: app.progress(),
            pending_callback: Arc::new(Mutex::new(app.launch_callback())),
            link_opener,
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

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }

    /// Queue a redirect fragment for the callback screen.
    pub fn set_pending_callback(&self, fragment: String) {
        *self
            .pending_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(fragment);
    }

    #[must_use]
    pub fn has_pending_callback(&self) -> bool {
        self.pending_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// One-shot: the fragment is consumed by whoever takes it first.
    #[must_use]
    pub fn take_pending_callback(&self) -> Option<String> {
        self.pending_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Reactive, app-wide UI state shared through context.
#[derive(Clone, Copy)]
pub struct UiState {
    /// Session admitted by the last route-guard check.
    pub session: Signal<Option<Session>>,
    /// Current toast, replaced by the next one.
    pub toast: Signal<Option<Notification>>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Must be called inside a component scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Signal::new(None),
            toast: Signal::new(None),
        }
    }

    pub fn notify(mut self, notification: Notification) {
        self.toast.set(Some(notification));
    }

    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.session.peek().clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
