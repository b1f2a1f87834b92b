use serde::{Deserialize, Serialize};
use thiserror::Error;

use atlas_types::{Chunk, Generation};

/// Pointer document for one asset, recording its latest committed chunk set.
///
/// Lives in the asset pointer collection under the scope name, and is written
/// in the same batch as the chunks it describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPointer {
    pub generation: Generation,
    pub chunk_count: u32,
}

/// Split a payload into ordered segments of at most `chunk_size` characters.
///
/// Splitting counts characters, not bytes, so any string survives the
/// split/reassemble round trip; asset payloads are base64 ASCII where the two
/// coincide. An empty payload yields zero segments.
pub fn split_payload(payload: &str, chunk_size: usize) -> Vec<String> {
    assert!(chunk_size > 0, "chunk_size must be positive");
    let mut segments = Vec::new();
    if payload.is_empty() {
        return segments;
    }
    let mut start = 0;
    let mut seen = 0;
    for (offset, _) in payload.char_indices() {
        if seen == chunk_size {
            segments.push(payload[start..offset].to_string());
            start = offset;
            seen = 0;
        }
        seen += 1;
    }
    segments.push(payload[start..].to_string());
    segments
}

/// Why an observed chunk set cannot be reassembled.
///
/// Never user-visible: an inconsistent set is a normal mid-replace
/// observation, absorbed by the reader until a later notice yields a whole
/// set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Inconsistency {
    #[error("no chunks observed")]
    Empty,

    #[error("chunk generations are not uniform ({first} vs {other})")]
    MixedGeneration { first: Generation, other: Generation },

    #[error("chunk indices are not the contiguous range 0..{expected}")]
    NonContiguous { expected: u32 },
}

/// A successfully reassembled asset payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReassembledAsset {
    /// The full payload, chunks concatenated in index order.
    pub payload: String,
    /// Uniform generation of the chunk set this was assembled from.
    pub generation: Generation,
    /// Number of chunks concatenated.
    pub chunk_count: u32,
}

/// Verify a chunk set is whole and concatenate it in index order.
///
/// Requires a uniform generation across all chunks and indices forming
/// exactly `{0..n-1}` — no gaps, no duplicates.
pub fn reassemble(mut chunks: Vec<Chunk>) -> Result<ReassembledAsset, Inconsistency> {
    let first = chunks.first().ok_or(Inconsistency::Empty)?;
    let generation = first.generation;
    for chunk in &chunks {
        if chunk.generation != generation {
            return Err(Inconsistency::MixedGeneration {
                first: generation,
                other: chunk.generation,
            });
        }
    }

    chunks.sort_by_key(|c| c.index);
    let expected = chunks.len() as u32;
    for (position, chunk) in chunks.iter().enumerate() {
        if chunk.index != position as u32 {
            return Err(Inconsistency::NonContiguous { expected });
        }
    }

    let mut payload = String::with_capacity(chunks.iter().map(|c| c.payload.len()).sum());
    for chunk in &chunks {
        payload.push_str(&chunk.payload);
    }
    Ok(ReassembledAsset {
        payload,
        generation,
        chunk_count: expected,
    })
}
