use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Names one logical binary asset.
///
/// The scope string is used to derive store collection paths, so it must be
/// non-empty and must not contain path separators.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetScope(String);

impl AssetScope {
    /// Create a scope from a raw name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.trim().is_empty() || name.contains('/') {
            return Err(TypeError::InvalidScope(name));
        }
        Ok(Self(name))
    }

    /// The raw scope name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store collection holding this asset's chunk documents.
    pub fn chunk_collection(&self) -> String {
        format!("assets/{}/chunks", self.0)
    }

    /// Store collection holding asset pointer documents.
    ///
    /// The pointer for this asset is the document with id [`Self::as_str`].
    pub fn pointer_collection(&self) -> &'static str {
        "assets"
    }
}

impl std::fmt::Display for AssetScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic marker distinguishing one version of an asset's chunk set from
/// a prior one.
///
/// Every chunk carries the generation it was written under, and the asset
/// pointer document records the latest committed generation. Readers ignore
/// any chunk set whose generation is not uniform and at least the last one
/// they published.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// The generation before any chunk set has been committed.
    pub const ZERO: Generation = Generation(0);

    /// Create a generation from a raw counter value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The generation following this one.
    pub fn next(&self) -> Generation {
        Generation(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen:{}", self.0)
    }
}

/// One ordered segment of an encoded asset payload, persisted as an
/// individually addressable document.
///
/// Invariant: across all chunks visible for an asset at a uniform generation,
/// indices form the contiguous range `0..count-1` with no gaps or duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// 0-based position of this segment within the payload.
    pub index: u32,
    /// Generation of the chunk set this segment belongs to.
    pub generation: Generation,
    /// The segment text.
    pub payload: String,
}

impl Chunk {
    /// Document id under the asset's chunk collection.
    pub fn doc_id(&self) -> String {
        self.index.to_string()
    }
}
