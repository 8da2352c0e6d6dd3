use std::sync::Arc;

use datapath_core::model::{
    ProgressAction, ProgressKey, ProgressState, ProgressUpsert, Session, Transition,
};

use crate::api::BackendApi;
use crate::error::ProgressServiceError;
use crate::notify::Notification;

/// What the detail view should show after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressOutcome {
    /// The server stored the new state; adopt what it echoed back.
    Saved {
        state: ProgressState,
        notification: Notification,
    },
    /// Adopt locally; nothing was written.
    Local(ProgressState),
    Unchanged,
}

impl ProgressOutcome {
    /// The state to display, or `None` to keep the current one.
    #[must_use]
    pub fn state(&self) -> Option<&ProgressState> {
        match self {
            ProgressOutcome::Saved { state, .. } | ProgressOutcome::Local(state) => Some(state),
            ProgressOutcome::Unchanged => None,
        }
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            ProgressOutcome::Saved { notification, .. } => Some(notification),
            _ => None,
        }
    }
}

impl ProgressServiceError {
    /// Toast for a failed action. The caller keeps its previous state.
    #[must_use]
    pub fn notification(&self) -> Notification {
        Notification::progress_failed()
    }
}

/// Runs progress actions through the state machine and the upsert endpoint.
///
/// New state is only handed back after the server acknowledged the write, so
/// a failed request leaves the caller's state untouched.
#[derive(Clone)]
pub struct ProgressService {
    api: Arc<dyn BackendApi>,
}

impl ProgressService {
    #[must_use]
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self { api }
    }

    /// Apply `action` to `current` for the item `key`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` for an action the state
    /// machine rejects and `ProgressServiceError::Api` when the write fails.
    pub async fn apply(
        &self,
        session: &Session,
        key: &ProgressKey,
        current: &ProgressState,
        action: &ProgressAction,
    ) -> Result<ProgressOutcome, ProgressServiceError> {
        let next = match current.apply(action)? {
            Transition::Unchanged => return Ok(ProgressOutcome::Unchanged),
            Transition::Local(state) => return Ok(ProgressOutcome::Local(state)),
            Transition::Persist(state) => state,
        };

        let upsert = ProgressUpsert::new(key.clone(), next)?;
        let record = self
            .api
            .upsert_progress(session.token(), &upsert)
            .await
            .inspect_err(|err| {
                tracing::warn!(item = %key.item_id, action = action.name(), error = %err, "progress write failed");
            })?;

        let state = record.into_state();
        tracing::info!(
            item = %key.item_id,
            kind = %key.kind,
            status = %state.status(),
            percentage = state.percentage().value(),
            "progress saved"
        );
        Ok(ProgressOutcome::Saved {
            state,
            notification: Notification::progress_saved(),
        })
    }
}
