pub mod content;
mod ids;
mod progress;
mod stats;
mod user;

pub use content::{
    AccessType, CareerPath, ContentDetails, ContentError, ContentItem, ContentItemDraft,
    ContentKind, Difficulty, Resource,
};
pub use ids::{ItemId, ParseIdError, UserId};
pub use progress::{
    Percentage, ProgressAction, ProgressError, ProgressKey, ProgressRecord, ProgressState,
    ProgressStatus, ProgressUpsert, Transition, find_record,
};
pub use stats::UserStats;
pub use user::{Session, SessionToken, SessionValidationError, User};
