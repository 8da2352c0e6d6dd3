mod item;
mod kind;
mod resource;

use thiserror::Error;

pub use item::{ContentDetails, ContentItem, ContentItemDraft};
pub use kind::{CareerPath, ContentKind, Difficulty};
pub use resource::{AccessType, Resource};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("career path cannot be empty")]
    EmptyCareerPath,

    #[error("unknown content kind: {0}")]
    UnknownKind(String),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unknown resource access type: {0}")]
    UnknownAccessType(String),

    #[error("invalid resource url: {0}")]
    InvalidResourceUrl(String),
}
