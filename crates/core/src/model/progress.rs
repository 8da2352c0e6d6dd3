use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::content::ContentKind;
use crate::model::ids::{ItemId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("percentage must be between 0 and 100, got {0}")]
    PercentageOutOfRange(i64),

    #[error("unknown progress status: {0}")]
    UnknownStatus(String),

    #[error("cannot {action} an item that is {status}")]
    InvalidTransition {
        action: &'static str,
        status: ProgressStatus,
    },

    #[error("status {status} is inconsistent with {percentage}%")]
    Inconsistent {
        status: ProgressStatus,
        percentage: u8,
    },
}

//
// ─── VALUE TYPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "not_started",
            ProgressStatus::InProgress => "in_progress",
            ProgressStatus::Completed => "completed",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "not started",
            ProgressStatus::InProgress => "in progress",
            ProgressStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(ProgressStatus::NotStarted),
            "in_progress" => Ok(ProgressStatus::InProgress),
            "completed" => Ok(ProgressStatus::Completed),
            other => Err(ProgressError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Completion percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    /// Where "start learning" places a fresh item.
    pub const START: Percentage = Percentage(10);
    pub const FULL: Percentage = Percentage(100);

    /// # Errors
    ///
    /// Returns `ProgressError::PercentageOutOfRange` when `value` exceeds 100.
    pub fn new(value: u8) -> Result<Self, ProgressError> {
        if value > 100 {
            return Err(ProgressError::PercentageOutOfRange(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// # Errors
    ///
    /// Returns `ProgressError::PercentageOutOfRange` when `value` is outside `0..=100`.
    pub fn from_wire(value: i64) -> Result<Self, ProgressError> {
        u8::try_from(value)
            .map_err(|_| ProgressError::PercentageOutOfRange(value))
            .and_then(Self::new)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 == 100
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

//
// ─── STATE MACHINE ─────────────────────────────────────────────────────────────
//

/// User-driven change to an item's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressAction {
    /// "Start learning": not started → in progress at 10%.
    Start,
    /// Slider move. 100 completes the item.
    SetPercentage(Percentage),
    /// Completes the item at 100% regardless of the current percentage.
    MarkComplete,
    /// Local notes edit; never written on its own.
    EditNotes(String),
    /// Writes the current status, percentage and notes.
    SaveNotes,
}

impl ProgressAction {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ProgressAction::Start => "start",
            ProgressAction::SetPercentage(_) => "set percentage of",
            ProgressAction::MarkComplete => "mark complete",
            ProgressAction::EditNotes(_) => "edit notes of",
            ProgressAction::SaveNotes => "save notes of",
        }
    }
}

/// The status/percentage/notes triple the server stores per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    status: ProgressStatus,
    percentage: Percentage,
    notes: String,
}

/// What applying an action means for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Upsert this state; adopt it once the server acknowledges.
    Persist(ProgressState),
    /// Adopt this state locally without writing.
    Local(ProgressState),
    /// Nothing changes.
    Unchanged,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::not_started()
    }
}

impl ProgressState {
    /// State of an item the user never touched (no server record).
    #[must_use]
    pub fn not_started() -> Self {
        Self {
            status: ProgressStatus::NotStarted,
            percentage: Percentage::ZERO,
            notes: String::new(),
        }
    }

    /// Build a state, enforcing the status/percentage invariant.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Inconsistent` when the pair violates the invariant.
    pub fn new(
        status: ProgressStatus,
        percentage: Percentage,
        notes: impl Into<String>,
    ) -> Result<Self, ProgressError> {
        let state = Self::from_persisted(status, percentage, notes);
        state.check_consistent()?;
        Ok(state)
    }

    /// Rehydrate a state exactly as the server reported it.
    ///
    /// The server is authoritative, so nothing is coerced here; callers can
    /// inspect `is_consistent` to detect drift.
    #[must_use]
    pub fn from_persisted(
        status: ProgressStatus,
        percentage: Percentage,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            status,
            percentage,
            notes: notes.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    #[must_use]
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// 100 ⟺ completed, anything strictly between 0 and 100 ⟹ in progress,
    /// and not started sits at 0.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.check_consistent().is_ok()
    }

    fn check_consistent(&self) -> Result<(), ProgressError> {
        let pct = self.percentage.value();
        let ok = match self.status {
            ProgressStatus::Completed => pct == 100,
            ProgressStatus::InProgress => pct < 100,
            ProgressStatus::NotStarted => pct == 0,
        };
        if ok {
            Ok(())
        } else {
            Err(ProgressError::Inconsistent {
                status: self.status,
                percentage: pct,
            })
        }
    }

    fn with(&self, status: ProgressStatus, percentage: Percentage) -> Self {
        Self {
            status,
            percentage,
            notes: self.notes.clone(),
        }
    }

    /// Compute the effect of `action` on this state.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidTransition` when starting an item that
    /// was already started.
    pub fn apply(&self, action: &ProgressAction) -> Result<Transition, ProgressError> {
        let transition = match action {
            ProgressAction::Start => {
                if self.status != ProgressStatus::NotStarted {
                    return Err(ProgressError::InvalidTransition {
                        action: action.name(),
                        status: self.status,
                    });
                }
                Transition::Persist(self.with(ProgressStatus::InProgress, Percentage::START))
            }
            ProgressAction::SetPercentage(pct) if pct.is_full() => {
                if self.status == ProgressStatus::Completed {
                    Transition::Unchanged
                } else {
                    Transition::Persist(self.with(ProgressStatus::Completed, Percentage::FULL))
                }
            }
            ProgressAction::SetPercentage(pct) if pct.value() == 0 => {
                if self.status == ProgressStatus::NotStarted {
                    Transition::Unchanged
                } else {
                    // The slider may rest at zero; only a later save writes it.
                    Transition::Local(self.with(ProgressStatus::InProgress, *pct))
                }
            }
            ProgressAction::SetPercentage(pct) => {
                let next = self.with(ProgressStatus::InProgress, *pct);
                if next == *self {
                    Transition::Unchanged
                } else {
                    Transition::Persist(next)
                }
            }
            ProgressAction::MarkComplete => {
                if self.status == ProgressStatus::Completed {
                    Transition::Unchanged
                } else {
                    Transition::Persist(self.with(ProgressStatus::Completed, Percentage::FULL))
                }
            }
            ProgressAction::EditNotes(text) => {
                if *text == self.notes {
                    Transition::Unchanged
                } else {
                    Transition::Local(Self {
                        status: self.status,
                        percentage: self.percentage,
                        notes: text.clone(),
                    })
                }
            }
            ProgressAction::SaveNotes => {
                if self.status == ProgressStatus::NotStarted {
                    Transition::Unchanged
                } else {
                    Transition::Persist(self.clone())
                }
            }
        };
        Ok(transition)
    }

    /// Adopt an acknowledged write without losing notes typed while it was
    /// in flight.
    ///
    /// `self` is the acknowledged state, `sent` what was written and `local`
    /// what the page shows now. Status and percentage come from the server;
    /// notes stay local if they changed after `sent` was taken.
    #[must_use]
    pub fn rebase(&self, sent: &ProgressState, local: &ProgressState) -> Self {
        let notes = if local.notes == sent.notes {
            self.notes.clone()
        } else {
            local.notes.clone()
        };
        Self {
            status: self.status,
            percentage: self.percentage,
            notes,
        }
    }
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Identifies one progress record for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgressKey {
    pub item_id: ItemId,
    pub kind: ContentKind,
}

impl ProgressKey {
    #[must_use]
    pub fn new(item_id: ItemId, kind: ContentKind) -> Self {
        Self { item_id, kind }
    }
}

/// Server-held progress for one (user, item) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    key: ProgressKey,
    user_id: Option<UserId>,
    state: ProgressState,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(key: ProgressKey, state: ProgressState) -> Self {
        Self {
            key,
            user_id: None,
            state,
            started_at: None,
            completed_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn from_persisted(
        key: ProgressKey,
        user_id: Option<UserId>,
        state: ProgressState,
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            key,
            user_id,
            state,
            started_at,
            completed_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn key(&self) -> &ProgressKey {
        &self.key
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    #[must_use]
    pub fn into_state(self) -> ProgressState {
        self.state
    }
}

/// Full-record write sent to the progress endpoint.
///
/// Only consistent states can be turned into an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpsert {
    key: ProgressKey,
    state: ProgressState,
}

impl ProgressUpsert {
    /// # Errors
    ///
    /// Returns `ProgressError::Inconsistent` if the state violates the
    /// status/percentage invariant.
    pub fn new(key: ProgressKey, state: ProgressState) -> Result<Self, ProgressError> {
        state.check_consistent()?;
        Ok(Self { key, state })
    }

    #[must_use]
    pub fn key(&self) -> &ProgressKey {
        &self.key
    }

    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }
}

/// Find the record for `key` in a full progress listing.
#[must_use]
pub fn find_record<'a>(
    records: &'a [ProgressRecord],
    key: &ProgressKey,
) -> Option<&'a ProgressRecord> {
    records.iter().find(|record| record.key() == key)
}
