use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use atlas_store::DocumentStore;
use atlas_types::{AssetScope, Chunk, Generation};

use crate::chunk::{reassemble, AssetPointer, ReassembledAsset};

/// What a connected client currently knows about the asset.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetView {
    /// No consistent observation yet; show a loading indicator.
    Loading,
    /// The store holds no chunks for this asset.
    Absent,
    /// A verified, reassembled payload.
    Ready(ReassembledAsset),
}

impl AssetView {
    /// Generation of the published reassembly, if any.
    pub fn generation(&self) -> Option<Generation> {
        match self {
            Self::Ready(asset) => Some(asset.generation),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Live reassembly feed for one asset.
///
/// Subscribes to the asset's chunk collection and re-evaluates the full
/// chunk set on every change notice. A new [`AssetView`] is published only
/// for a consistent observation; anything that looks like a mid-replace
/// state retains the last known-good value and waits for the next notice.
/// There is no timeout on that wait.
///
/// Dropping the feed aborts the evaluation task and releases the underlying
/// change-feed subscription.
pub struct AssetFeed {
    rx: watch::Receiver<AssetView>,
    task: JoinHandle<()>,
}

impl AssetFeed {
    /// Start a feed for `scope` on the given store.
    pub fn spawn(store: Arc<dyn DocumentStore>, scope: AssetScope) -> Self {
        let (tx, rx) = watch::channel(AssetView::Loading);
        // Register the watch before spawning so no commit between spawn and
        // the task's first poll can be missed.
        let mut notices = store.watch(&scope.chunk_collection());

        let task = tokio::spawn(async move {
            let mut last_published: Option<Generation> = None;
            publish(evaluate(&*store, &scope, last_published).await, &tx, &mut last_published);
            loop {
                match notices.recv().await {
                    // A lagged receiver only missed intermediate notices;
                    // re-reading current state is always valid.
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        publish(
                            evaluate(&*store, &scope, last_published).await,
                            &tx,
                            &mut last_published,
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self { rx, task }
    }

    /// Hand out a receiver for the published views. Any number of consumers
    /// may subscribe.
    pub fn subscribe(&self) -> watch::Receiver<AssetView> {
        self.rx.clone()
    }

    /// The most recently published view.
    pub fn current(&self) -> AssetView {
        self.rx.borrow().clone()
    }
}

impl Drop for AssetFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn publish(
    view: Option<AssetView>,
    tx: &watch::Sender<AssetView>,
    last_published: &mut Option<Generation>,
) {
    let Some(view) = view else { return };
    if let AssetView::Ready(ref asset) = view {
        *last_published = Some(asset.generation);
    }
    tx.send_if_modified(move |current| {
        if *current == view {
            false
        } else {
            *current = view;
            true
        }
    });
}

/// One full evaluation of the chunk set. `None` means "not ready": retain
/// the last good view and wait for the next notice.
async fn evaluate(
    store: &dyn DocumentStore,
    scope: &AssetScope,
    last_published: Option<Generation>,
) -> Option<AssetView> {
    let docs = match store.list(&scope.chunk_collection()).await {
        Ok(docs) => docs,
        Err(err) => {
            debug!(%scope, error = %err, "chunk read failed; retaining last view");
            return None;
        }
    };
    if docs.is_empty() {
        return Some(AssetView::Absent);
    }

    let mut chunks: Vec<Chunk> = Vec::with_capacity(docs.len());
    for doc in &docs {
        match doc.decode() {
            Ok(chunk) => chunks.push(chunk),
            Err(err) => {
                debug!(%scope, doc = %doc.id, error = %err, "undecodable chunk; retaining last view");
                return None;
            }
        }
    }

    let pointer: AssetPointer = match store.get(scope.pointer_collection(), scope.as_str()).await {
        Ok(Some(doc)) => match doc.decode() {
            Ok(pointer) => pointer,
            Err(err) => {
                debug!(%scope, error = %err, "undecodable asset pointer");
                return None;
            }
        },
        // Chunks without a pointer is a torn observation.
        Ok(None) => {
            debug!(%scope, "chunks present but no asset pointer");
            return None;
        }
        Err(err) => {
            debug!(%scope, error = %err, "pointer read failed; retaining last view");
            return None;
        }
    };

    match reassemble(chunks) {
        Ok(asset) => {
            if asset.generation != pointer.generation {
                debug!(%scope, observed = %asset.generation, pointer = %pointer.generation,
                    "chunk set does not match asset pointer");
                return None;
            }
            if let Some(last) = last_published {
                if asset.generation < last {
                    debug!(%scope, stale = %asset.generation, %last, "ignoring stale chunk set");
                    return None;
                }
            }
            Some(AssetView::Ready(asset))
        }
        Err(inconsistency) => {
            debug!(%scope, %inconsistency, "chunk set not ready");
            None
        }
    }
}
