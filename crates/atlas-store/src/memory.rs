use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::debug;

use crate::batch::{WriteBatch, WriteOp};
use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::traits::{ChangeNotice, CollectionWatch, DocumentStore};

use async_trait::async_trait;

/// Capacity of per-collection notification channels. A lagged watcher misses
/// intermediate notices, which is harmless: each notice only prompts a
/// re-read of current state.
const CHANNEL_CAPACITY: usize = 1024;

/// In-memory, HashMap-based document store.
///
/// Intended for tests and embedding. Collections are held behind a single
/// `RwLock`, which makes every commit a point-in-time atomic replacement:
/// readers observe either the state before a batch or after it, never a
/// mixture.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
    watchers: RwLock<HashMap<String, broadcast::Sender<ChangeNotice>>>,
    revision: AtomicU64,
    fail_next: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            watchers: RwLock::new(HashMap::new()),
            revision: AtomicU64::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Number of documents currently in a collection.
    pub fn collection_len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .expect("lock poisoned")
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Store-global commit counter.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Force the next [`DocumentStore::commit`] to fail with
    /// [`StoreError::TransactionFailure`] and apply nothing.
    ///
    /// Test hook for exercising failure surfacing in callers.
    pub fn fail_next_commit(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn notify(&self, collections: impl IntoIterator<Item = String>, revision: u64) {
        let mut watchers = self.watchers.write().expect("lock poisoned");
        for collection in collections {
            if let Some(sender) = watchers.get(&collection) {
                // Send failure means no live receivers; prune the channel.
                if sender
                    .send(ChangeNotice {
                        collection: collection.clone(),
                        revision,
                    })
                    .is_err()
                {
                    watchers.remove(&collection);
                }
            }
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let map = self.collections.read().expect("lock poisoned");
        Ok(map.get(collection).and_then(|c| c.get(id)).cloned())
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let map = self.collections.read().expect("lock poisoned");
        Ok(map
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::TransactionFailure(
                "injected commit failure".into(),
            ));
        }
        if batch.is_empty() {
            return Ok(());
        }

        let touched = batch.collections();
        {
            let mut map = self.collections.write().expect("lock poisoned");
            for op in batch.ops() {
                match op {
                    WriteOp::Put { collection, doc } => {
                        map.entry(collection.clone())
                            .or_default()
                            .insert(doc.id.clone(), doc.clone());
                    }
                    WriteOp::Delete { collection, id } => {
                        if let Some(c) = map.get_mut(collection) {
                            c.remove(id);
                        }
                    }
                    WriteOp::ClearCollection { collection } => {
                        if let Some(c) = map.get_mut(collection) {
                            c.clear();
                        }
                    }
                }
            }
        }

        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(revision, ops = batch.len(), "committed write batch");
        // Notify after the write lock is released so watchers re-reading
        // synchronously cannot deadlock against the commit.
        self.notify(touched, revision);
        Ok(())
    }

    fn watch(&self, collection: &str) -> CollectionWatch {
        let mut watchers = self.watchers.write().expect("lock poisoned");
        watchers
            .entry(collection.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.collections.read().expect("lock poisoned");
        f.debug_struct("InMemoryDocumentStore")
            .field("collections", &map.len())
            .field("revision", &self.revision())
            .finish()
    }
}
