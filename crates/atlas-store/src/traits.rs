use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::batch::WriteBatch;
use crate::document::Document;
use crate::error::StoreResult;

/// Push notification that a collection changed.
///
/// Carries no data: consumers re-read the full collection on every notice.
/// This matches snapshot-subscription semantics where each delivery reflects
/// the collection's current state, not a delta.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeNotice {
    /// The collection that changed.
    pub collection: String,
    /// Store-global commit counter at the time of the change.
    pub revision: u64,
}

/// A live subscription to one collection's change feed.
///
/// Dropping the receiver releases the subscription; the store prunes
/// channels with no remaining receivers on the next commit.
pub type CollectionWatch = broadcast::Receiver<ChangeNotice>;

/// A document database holding named collections of JSON records.
///
/// All implementations must satisfy these invariants:
/// - [`Self::commit`] is atomic all-or-nothing: on error no operation in the
///   batch was applied and prior state is untouched.
/// - Ordering between concurrent commits is the backend's commit sequencing;
///   last commit wins, no merge.
/// - Every successful commit delivers one [`ChangeNotice`] per touched
///   collection to all live watchers, after the new state is visible.
/// - The store never interprets document bodies.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document by id. Returns `Ok(None)` if absent.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Read the full current contents of a collection, ordered by id.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Commit a write batch atomically.
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;

    /// Subscribe to a collection's change feed.
    fn watch(&self, collection: &str) -> CollectionWatch;
}
