use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use atlas_store::{AccessGate, Document, DocumentStore, WriteAction, WriteBatch};
use atlas_types::{AssetScope, Chunk, Generation};

use crate::chunk::{split_payload, AssetPointer};
use crate::compressor::AssetCompressor;
use crate::error::{AssetError, AssetResult};

/// Default chunk size in characters, comfortably under the backing store's
/// per-document cap.
pub const DEFAULT_CHUNK_SIZE: usize = 800_000;

/// Default cap on raw upload size, checked before compression.
pub const DEFAULT_MAX_RAW_BYTES: u64 = 15 * 1024 * 1024;

/// Chunking and upload-cap parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Maximum characters per chunk document.
    pub chunk_size: usize,
    /// Maximum raw upload size in bytes.
    pub max_raw_bytes: u64,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_raw_bytes: DEFAULT_MAX_RAW_BYTES,
        }
    }
}

/// Replaces an asset's chunk set wholesale.
///
/// Every replacement is one atomic batch: clear the chunk collection, insert
/// the new chunk documents, and update the asset pointer. Readers observe
/// either the old set or the new one, never a mixture. Between concurrent
/// re-uploads the last committed batch wins; contents are never merged.
pub struct ChunkWriter {
    store: Arc<dyn DocumentStore>,
    gate: Arc<dyn AccessGate>,
    scope: AssetScope,
    config: WriterConfig,
}

impl ChunkWriter {
    pub fn new(store: Arc<dyn DocumentStore>, gate: Arc<dyn AccessGate>, scope: AssetScope) -> Self {
        Self::with_config(store, gate, scope, WriterConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        gate: Arc<dyn AccessGate>,
        scope: AssetScope,
        config: WriterConfig,
    ) -> Self {
        Self {
            store,
            gate,
            scope,
            config,
        }
    }

    pub fn scope(&self) -> &AssetScope {
        &self.scope
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Upload entry point: cap check, compression, then chunk replacement.
    ///
    /// The size cap is enforced on the raw bytes, before compression and
    /// before any store interaction.
    pub async fn upload(&self, raw: Vec<u8>, compressor: &AssetCompressor) -> AssetResult<Generation> {
        let actual = raw.len() as u64;
        if actual > self.config.max_raw_bytes {
            return Err(AssetError::SizeExceeded {
                actual,
                cap: self.config.max_raw_bytes,
            });
        }
        let payload = compressor.compress(raw).await?;
        self.replace(&payload).await
    }

    /// Atomically replace the asset's chunk set with a split of `payload`.
    ///
    /// Returns the generation the new set was committed under.
    pub async fn replace(&self, payload: &str) -> AssetResult<Generation> {
        if !self.gate.is_authorized(WriteAction::ReplaceAsset).await {
            warn!(scope = %self.scope, "chunk replace refused by gate");
            return Err(AssetError::WriteDenied(WriteAction::ReplaceAsset));
        }

        let generation = self.current_generation().await?.next();
        let segments = split_payload(payload, self.config.chunk_size);
        let chunk_collection = self.scope.chunk_collection();

        let mut batch = WriteBatch::new();
        batch.clear_collection(&chunk_collection);
        let chunk_count = segments.len() as u32;
        for (index, payload) in segments.into_iter().enumerate() {
            let chunk = Chunk {
                index: index as u32,
                generation,
                payload,
            };
            batch.put(&chunk_collection, Document::encode(chunk.doc_id(), &chunk)?);
        }
        let pointer = AssetPointer {
            generation,
            chunk_count,
        };
        batch.put(
            self.scope.pointer_collection(),
            Document::encode(self.scope.as_str(), &pointer)?,
        );

        self.store.commit(batch).await?;
        debug!(scope = %self.scope, %generation, chunk_count, "replaced chunk set");
        Ok(generation)
    }

    async fn current_generation(&self) -> AssetResult<Generation> {
        let doc = self
            .store
            .get(self.scope.pointer_collection(), self.scope.as_str())
            .await?;
        Ok(match doc {
            Some(doc) => doc.decode::<AssetPointer>()?.generation,
            None => Generation::ZERO,
        })
    }
}
