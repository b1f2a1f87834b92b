use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use atlas_store::DocumentStore;
use atlas_types::Region;

use crate::store::REGION_COLLECTION;

/// Live view of the region collection.
///
/// Re-reads and republishes the full sorted region list on every change
/// notice, so every connected client converges on the same overlay state.
/// Dropping the feed aborts its task and releases the subscription.
pub struct RegionFeed {
    rx: watch::Receiver<Vec<Region>>,
    task: JoinHandle<()>,
}

impl RegionFeed {
    /// Start a feed on the given store.
    pub fn spawn(store: Arc<dyn DocumentStore>) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        let mut notices = store.watch(REGION_COLLECTION);

        let task = tokio::spawn(async move {
            publish(&*store, &tx).await;
            loop {
                match notices.recv().await {
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        publish(&*store, &tx).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self { rx, task }
    }

    /// Hand out a receiver for the published region lists.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Region>> {
        self.rx.clone()
    }

    /// The most recently published region list.
    pub fn current(&self) -> Vec<Region> {
        self.rx.borrow().clone()
    }
}

impl Drop for RegionFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn publish(store: &dyn DocumentStore, tx: &watch::Sender<Vec<Region>>) {
    let docs = match store.list(REGION_COLLECTION).await {
        Ok(docs) => docs,
        Err(err) => {
            debug!(error = %err, "region read failed; retaining last view");
            return;
        }
    };
    // Regions are independent documents: one undecodable record must not
    // hide the rest of the overlay.
    let mut regions: Vec<Region> = docs
        .iter()
        .filter_map(|doc| match doc.decode() {
            Ok(region) => Some(region),
            Err(err) => {
                debug!(doc = %doc.id, error = %err, "skipping undecodable region");
                None
            }
        })
        .collect();
    regions.sort_by(|a, b| a.code.cmp(&b.code).then(a.id.cmp(&b.id)));

    tx.send_if_modified(move |current| {
        if *current == regions {
            false
        } else {
            *current = regions;
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use atlas_store::{AllowAll, InMemoryDocumentStore};
    use atlas_types::Point;

    use crate::directory::StaticUnitDirectory;
    use crate::store::RegionStore;

    fn region_store(store: &Arc<InMemoryDocumentStore>) -> RegionStore {
        RegionStore::new(
            Arc::clone(store) as Arc<dyn DocumentStore>,
            Arc::new(AllowAll),
            Arc::new(StaticUnitDirectory::default()),
        )
    }

    async fn wait_until(
        rx: &mut watch::Receiver<Vec<Region>>,
        pred: impl Fn(&[Region]) -> bool,
    ) -> Vec<Region> {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                {
                    let view = rx.borrow_and_update();
                    if pred(&view) {
                        return view.clone();
                    }
                }
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("region feed did not converge")
    }

    #[tokio::test]
    async fn add_and_delete_propagate_to_subscribers() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let feed = RegionFeed::spawn(Arc::clone(&store) as Arc<dyn DocumentStore>);
        let mut rx = feed.subscribe();
        let regions = region_store(&store);

        let added = regions
            .add("A1", Point::new(10.0, 10.0), Point::new(20.0, 20.0))
            .await
            .unwrap();
        let view = wait_until(&mut rx, |v| v.len() == 1).await;
        assert_eq!(view[0], added);

        regions.delete(added.id).await.unwrap();
        wait_until(&mut rx, |v| v.is_empty()).await;
    }

    #[tokio::test]
    async fn published_list_is_sorted_by_code() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let feed = RegionFeed::spawn(Arc::clone(&store) as Arc<dyn DocumentStore>);
        let mut rx = feed.subscribe();
        let regions = region_store(&store);

        regions
            .add("B2", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap();
        regions
            .add("A1", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap();

        let view = wait_until(&mut rx, |v| v.len() == 2).await;
        assert_eq!(view[0].code, "A1");
        assert_eq!(view[1].code, "B2");
    }

    #[tokio::test]
    async fn multiple_subscribers_see_the_same_overlay() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let feed = RegionFeed::spawn(Arc::clone(&store) as Arc<dyn DocumentStore>);
        let mut rx1 = feed.subscribe();
        let mut rx2 = feed.subscribe();

        region_store(&store)
            .add("A1", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap();

        let v1 = wait_until(&mut rx1, |v| v.len() == 1).await;
        let v2 = wait_until(&mut rx2, |v| v.len() == 1).await;
        assert_eq!(v1, v2);
    }

    #[tokio::test]
    async fn dropping_the_feed_releases_the_subscription() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let feed = RegionFeed::spawn(Arc::clone(&store) as Arc<dyn DocumentStore>);
        drop(feed);

        tokio::time::timeout(Duration::from_secs(2), async {
            while Arc::strong_count(&store) > 1 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("feed task did not release the store");
    }
}
