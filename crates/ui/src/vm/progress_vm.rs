use datapath_core::model::{ProgressAction, ProgressState, ProgressStatus};

/// Which progress controls the detail page shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressPanelVm {
    pub status_label: &'static str,
    pub percentage: u8,
    pub show_start: bool,
    pub show_slider: bool,
    pub show_mark_complete: bool,
    pub show_notes: bool,
    pub notes: String,
}

impl From<&ProgressState> for ProgressPanelVm {
    fn from(state: &ProgressState) -> Self {
        let status = state.status();
        let started = status != ProgressStatus::NotStarted;
        Self {
            status_label: match status {
                ProgressStatus::NotStarted => "Not started",
                ProgressStatus::InProgress => "In progress",
                ProgressStatus::Completed => "Completed!",
            },
            percentage: state.percentage().value(),
            show_start: !started,
            show_slider: started,
            show_mark_complete: status == ProgressStatus::InProgress,
            show_notes: started,
            notes: state.notes().to_owned(),
        }
    }
}

/// Fold an action raised while a write is in flight into the one already
/// waiting. Every write carries the current notes, so a queued save is
/// subsumed by any other write, and a later save never displaces one.
#[must_use]
pub fn queue_action(queued: Option<ProgressAction>, next: ProgressAction) -> ProgressAction {
    match (queued, next) {
        (Some(pending), ProgressAction::SaveNotes) => pending,
        (_, next) => next,
    }
}
