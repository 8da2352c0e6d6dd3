use thiserror::Error;

use crate::model::{ContentError, ParseIdError, ProgressError, SessionValidationError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Session(#[from] SessionValidationError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
