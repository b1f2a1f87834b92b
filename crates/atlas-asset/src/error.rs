use thiserror::Error;

use atlas_store::{StoreError, WriteAction};

/// Errors from the asset pipeline.
///
/// None of these are retried automatically; the user re-triggers the
/// originating action. Failures leave prior persisted state untouched.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The source image is unreadable or corrupt. No output is produced.
    #[error("cannot decode source image: {0}")]
    Decode(String),

    /// Re-encoding the processed image failed.
    #[error("cannot encode asset image: {0}")]
    Encode(String),

    /// The raw upload exceeds the configured cap. Checked before compression
    /// and before any store interaction.
    #[error("raw upload is {actual} bytes, over the {cap}-byte cap")]
    SizeExceeded { actual: u64, cap: u64 },

    /// The authorization gate refused the mutation.
    #[error("write denied: {0}")]
    WriteDenied(WriteAction),

    /// The backing store rejected a read or commit.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for asset pipeline operations.
pub type AssetResult<T> = Result<T, AssetError>;
