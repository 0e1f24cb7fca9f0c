use common::PlatformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("An update is already pending for this item")]
    AlreadyPending,

    #[error("Comment body is empty")]
    EmptyComment,

    #[error("Backend update failed: {0}")]
    Gateway(#[from] PlatformError),
}

pub type EngagementResult<T> = Result<T, EngagementError>;
