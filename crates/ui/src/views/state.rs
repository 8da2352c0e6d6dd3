use dioxus::prelude::*;

use datapath_core::model::ContentKind;
use services::ContentServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotFound,
    Unauthenticated,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NotFound => "Not found.",
            ViewError::Unauthenticated => "Please sign in again.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// "Topic not found" and friends.
    #[must_use]
    pub fn message_for(self, kind: ContentKind) -> String {
        match self {
            ViewError::NotFound => format!("{} not found", kind.label()),
            other => other.message().to_owned(),
        }
    }
}

impl From<&ContentServiceError> for ViewError {
    fn from(err: &ContentServiceError) -> Self {
        if err.is_not_found() {
            ViewError::NotFound
        } else {
            ViewError::Unknown
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

/// Resources resolve to `None` when their load was superseded; that reads
/// as still loading.
#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Option<Result<T, ViewError>>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Some(Ok(data))) => ViewState::Ready(data.clone()),
            Some(Some(Err(err))) => ViewState::Error(*err),
            Some(None) => ViewState::Loading,
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
