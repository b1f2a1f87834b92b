use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid region id: {0}")]
    InvalidRegionId(String),

    #[error("invalid asset scope: {0}")]
    InvalidScope(String),
}
