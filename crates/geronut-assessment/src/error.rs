use thiserror::Error;

use geronut_core::ValidationError;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("unreadable birth date: '{0}'")]
    UnreadableBirthDate(String),
}
