#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth;
pub mod config;
pub mod content_service;
pub mod error;
pub mod generation;
pub mod notify;
pub mod progress_service;

pub use datapath_core::Clock;

pub use api::{BackendApi, HttpBackend, SessionGrant};
pub use app_services::AppServices;
pub use auth::{Access, AuthOutcome, RouteGuard, SessionResolver, parse_session_fragment};
pub use config::ApiConfig;
pub use content_service::{ContentListing, ContentService, ContinueItem, Dashboard, ItemDetail};
pub use error::{ApiError, AppServicesError, ConfigError, ContentServiceError, ProgressServiceError, SessionError};
pub use generation::{LoadGeneration, LoadTicket};
pub use notify::{Notification, NotificationLevel};
pub use progress_service::{ProgressOutcome, ProgressService};
