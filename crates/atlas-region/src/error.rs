use thiserror::Error;

use atlas_store::{StoreError, WriteAction};

/// Errors from region operations.
#[derive(Debug, Error)]
pub enum RegionError {
    /// A region commit was attempted with no code label.
    #[error("region label must not be empty")]
    EmptyLabel,

    /// The authorization gate refused the mutation.
    #[error("write denied: {0}")]
    WriteDenied(WriteAction),

    /// The backing store rejected a read or commit.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for region operations.
pub type RegionResult<T> = Result<T, RegionError>;
