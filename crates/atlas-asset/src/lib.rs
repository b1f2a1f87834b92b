//! Chunked binary-asset pipeline for Atlas.
//!
//! The backing document database caps individual documents far below a
//! typical map image, so an asset is never stored as one record. Instead the
//! raw image is compressed into a bounded textual payload, split into ordered
//! fixed-size chunks, and committed as a single atomic delete-all-plus-
//! insert-all batch. Every connected client (including the uploader) holds a
//! live [`AssetFeed`] that re-reads the chunk set on each change notice,
//! verifies it is whole, and publishes the reassembled payload.
//!
//! # Pipeline
//!
//! upload → [`AssetCompressor`] → [`ChunkWriter`] → store → [`AssetFeed`]
//!
//! # Consistency
//!
//! Every chunk carries the [`Generation`](atlas_types::Generation) it was
//! written under, and the asset pointer document records the latest committed
//! one. A feed publishes a reassembly only when the observed chunk set has a
//! uniform, pointer-matching, non-stale generation and indices form exactly
//! `{0..n-1}`. Anything else is treated as a mid-replace observation: the
//! feed keeps its last known-good value and waits for the next notice. There
//! is no timeout — callers needing bounded latency impose their own.

pub mod chunk;
pub mod compressor;
pub mod error;
pub mod reader;
pub mod writer;

// Re-export primary types at crate root for ergonomic imports.
pub use chunk::{reassemble, split_payload, AssetPointer, Inconsistency, ReassembledAsset};
pub use compressor::{AssetCompressor, CompressorConfig};
pub use error::{AssetError, AssetResult};
pub use reader::{AssetFeed, AssetView};
pub use writer::{ChunkWriter, WriterConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RAW_BYTES};
