use std::sync::Arc;

use tracing::{debug, warn};

use atlas_store::{AccessGate, CollectionWatch, Document, DocumentStore, WriteAction, WriteBatch};
use atlas_types::{Point, Region, RegionId};

use crate::directory::UnitDirectory;
use crate::error::{RegionError, RegionResult};

/// Collection holding one document per region annotation.
pub const REGION_COLLECTION: &str = "regions";

/// CRUD for named rectangular annotations over the asset's coordinate space.
///
/// Every region is an independent document, so concurrent adds and deletes
/// from different clients commit without racing each other. A region is
/// never edited in place: edit = delete + recreate.
pub struct RegionStore {
    store: Arc<dyn DocumentStore>,
    gate: Arc<dyn AccessGate>,
    directory: Arc<dyn UnitDirectory>,
}

impl RegionStore {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        gate: Arc<dyn AccessGate>,
        directory: Arc<dyn UnitDirectory>,
    ) -> Self {
        Self {
            store,
            gate,
            directory,
        }
    }

    /// Create a region from two corner points, in any drag direction.
    ///
    /// Bounds are normalized so `x1 <= x2` and `y1 <= y2`; the region gets a
    /// fresh unique id. Fails with [`RegionError::EmptyLabel`] if `code` is
    /// empty or whitespace.
    pub async fn add(&self, code: &str, a: Point, b: Point) -> RegionResult<Region> {
        let code = code.trim();
        if code.is_empty() {
            return Err(RegionError::EmptyLabel);
        }
        if !self.gate.is_authorized(WriteAction::AddRegion).await {
            warn!(code, "region add refused by gate");
            return Err(RegionError::WriteDenied(WriteAction::AddRegion));
        }

        let region = Region::from_corners(code, a, b);
        let mut batch = WriteBatch::new();
        batch.put(
            REGION_COLLECTION,
            Document::encode(region.id.to_string(), &region)?,
        );
        self.store.commit(batch).await?;
        debug!(id = %region.id, code = %region.code, "added region");
        Ok(region)
    }

    /// Remove a region. Returns `false` (not an error) if the id was absent.
    pub async fn delete(&self, id: RegionId) -> RegionResult<bool> {
        if !self.gate.is_authorized(WriteAction::DeleteRegion).await {
            warn!(%id, "region delete refused by gate");
            return Err(RegionError::WriteDenied(WriteAction::DeleteRegion));
        }

        let existed = self
            .store
            .get(REGION_COLLECTION, &id.to_string())
            .await?
            .is_some();
        let mut batch = WriteBatch::new();
        batch.delete(REGION_COLLECTION, id.to_string());
        self.store.commit(batch).await?;
        debug!(%id, existed, "deleted region");
        Ok(existed)
    }

    /// All regions, sorted by code then id for stable display order.
    pub async fn list(&self) -> RegionResult<Vec<Region>> {
        let docs = self.store.list(REGION_COLLECTION).await?;
        let mut regions = docs
            .iter()
            .map(Document::decode)
            .collect::<Result<Vec<Region>, _>>()?;
        regions.sort_by(|a, b| a.code.cmp(&b.code).then(a.id.cmp(&b.id)));
        Ok(regions)
    }

    /// Number of unit-directory entries assigned to `code`.
    ///
    /// A pure read-side join against the injected directory; nothing is
    /// persisted.
    pub async fn count_by_code(&self, code: &str) -> RegionResult<usize> {
        let units = self.directory.units().await?;
        Ok(units.iter().filter(|u| u.area_code == code).count())
    }

    /// Subscribe to the region collection's change feed.
    pub fn watch(&self) -> CollectionWatch {
        self.store.watch(REGION_COLLECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use atlas_store::{AllowAll, DenyAll, InMemoryDocumentStore};
    use atlas_types::UnitRef;

    use crate::directory::StaticUnitDirectory;

    fn region_store(store: &Arc<InMemoryDocumentStore>) -> RegionStore {
        RegionStore::new(
            Arc::clone(store) as Arc<dyn DocumentStore>,
            Arc::new(AllowAll),
            Arc::new(StaticUnitDirectory::default()),
        )
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn add_normalizes_any_drag_direction() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = region_store(&store);

        let region = regions
            .add("A1", Point::new(80.0, 70.0), Point::new(10.0, 5.0))
            .await
            .unwrap();
        assert_eq!(region.bounds.x1, 10.0);
        assert_eq!(region.bounds.y1, 5.0);
        assert_eq!(region.bounds.x2, 80.0);
        assert_eq!(region.bounds.y2, 70.0);

        // Persisted with the same normalized shape.
        let listed = regions.list().await.unwrap();
        assert_eq!(listed, vec![region]);
    }

    #[tokio::test]
    async fn add_rejects_empty_label() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = region_store(&store);

        for code in ["", "   ", "\t"] {
            let err = regions
                .add(code, Point::new(0.0, 0.0), Point::new(1.0, 1.0))
                .await
                .unwrap_err();
            assert!(matches!(err, RegionError::EmptyLabel));
        }
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn add_assigns_unique_ids() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = region_store(&store);
        let a = regions
            .add("A1", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap();
        let b = regions
            .add("A1", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(regions.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn denied_gate_mutates_nothing() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = RegionStore::new(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            Arc::new(DenyAll),
            Arc::new(StaticUnitDirectory::default()),
        );
        let err = regions
            .add("A1", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegionError::WriteDenied(WriteAction::AddRegion)
        ));
        assert_eq!(store.revision(), 0);
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = region_store(&store);
        let a = regions
            .add("A1", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap();
        let b = regions
            .add("B2", Point::new(2.0, 2.0), Point::new(3.0, 3.0))
            .await
            .unwrap();

        assert!(regions.delete(a.id).await.unwrap());
        let remaining = regions.list().await.unwrap();
        assert_eq!(remaining, vec![b]);
    }

    #[tokio::test]
    async fn delete_absent_id_is_noop() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = region_store(&store);
        assert!(!regions.delete(RegionId::generate()).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_denied_by_gate() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = RegionStore::new(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            Arc::new(DenyAll),
            Arc::new(StaticUnitDirectory::default()),
        );
        let err = regions.delete(RegionId::generate()).await.unwrap_err();
        assert!(matches!(
            err,
            RegionError::WriteDenied(WriteAction::DeleteRegion)
        ));
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_sorts_by_code() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = region_store(&store);
        regions
            .add("B2", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap();
        regions
            .add("A1", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await
            .unwrap();

        let codes: Vec<_> = regions
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.code)
            .collect();
        assert_eq!(codes, vec!["A1".to_string(), "B2".to_string()]);
    }

    // -----------------------------------------------------------------------
    // Unit-directory join
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn count_by_code_joins_the_directory() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = RegionStore::new(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            Arc::new(AllowAll),
            Arc::new(StaticUnitDirectory::new(vec![
                UnitRef::new("u-1", "A1"),
                UnitRef::new("u-2", "A1"),
                UnitRef::new("u-3", "B2"),
                UnitRef::new("u-4", ""),
            ])),
        );
        assert_eq!(regions.count_by_code("A1").await.unwrap(), 2);
        assert_eq!(regions.count_by_code("B2").await.unwrap(), 1);
        assert_eq!(regions.count_by_code("C3").await.unwrap(), 0);
        // Counting persists nothing.
        assert_eq!(store.revision(), 0);
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn concurrent_adds_all_survive() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let regions = Arc::new(region_store(&store));

        let mut handles = Vec::new();
        for i in 0..8 {
            let regions = Arc::clone(&regions);
            handles.push(tokio::spawn(async move {
                regions
                    .add(
                        &format!("Z{i}"),
                        Point::new(i as f64, 0.0),
                        Point::new(i as f64 + 1.0, 1.0),
                    )
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        // Keyed documents: no add overwrote another.
        assert_eq!(regions.list().await.unwrap().len(), 8);
    }
}
