// crates/repton-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Error)]
pub enum MapError {
    /// Named entry absent from the container.
    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("incorrect size: expected {expected:#06x} bytes, got {actual:#06x}")]
    IncorrectSize { expected: usize, actual: usize },

    #[error("{what} capacity exceeded: need {needed}, limit {limit}")]
    CapacityExceeded {
        what: &'static str,
        needed: usize,
        limit: usize,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("document format error: {0}")]
    DocumentFormat(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapError {
    pub(crate) fn check_size(expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(MapError::IncorrectSize { expected, actual });
        }
        Ok(())
    }
}
