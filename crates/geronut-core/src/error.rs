use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("consultation history out of order at entry {index}")]
    HistoryOutOfOrder { index: usize },

    #[error("unrecognised timestamp: {0}")]
    InvalidTimestamp(String),
}
