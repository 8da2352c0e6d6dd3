//! Transient user-facing messages ("toasts").

use datapath_core::model::ContentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    level: NotificationLevel,
    message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn level(&self) -> NotificationLevel {
        self.level
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    // ─── Canonical messages ────────────────────────────────────────────────

    #[must_use]
    pub fn signed_in() -> Self {
        Self::success("Welcome! You are now logged in.")
    }

    #[must_use]
    pub fn sign_in_failed() -> Self {
        Self::error("Authentication failed. Please try again.")
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::success("Logged out successfully")
    }

    #[must_use]
    pub fn sign_out_failed() -> Self {
        Self::error("Logout failed")
    }

    #[must_use]
    pub fn progress_saved() -> Self {
        Self::success("Progress updated!")
    }

    #[must_use]
    pub fn progress_failed() -> Self {
        Self::error("Failed to update progress")
    }

    #[must_use]
    pub fn list_failed(kind: ContentKind) -> Self {
        Self::error(format!("Failed to load {}", kind.plural()))
    }

    #[must_use]
    pub fn detail_failed(kind: ContentKind) -> Self {
        Self::error(format!("Failed to load {} details", kind.as_str()))
    }

    #[must_use]
    pub fn dashboard_failed() -> Self {
        Self::error("Failed to load dashboard data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_specific_messages() {
        assert_eq!(
            Notification::list_failed(ContentKind::Topic).message(),
            "Failed to load topics"
        );
        assert_eq!(
            Notification::detail_failed(ContentKind::Project).message(),
            "Failed to load project details"
        );
        assert!(Notification::progress_failed().is_error());
        assert!(!Notification::progress_saved().is_error());
    }
}
