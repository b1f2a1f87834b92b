use async_trait::async_trait;

use atlas_types::UnitRef;

use crate::error::RegionResult;

/// Read-only view of the external unit directory.
///
/// The directory (sales targets, their attributes, their CRUD surface) is an
/// external collaborator; Atlas only consults the area-code attribute for
/// per-region counts. Injected into [`RegionStore`](crate::RegionStore) at
/// construction.
#[async_trait]
pub trait UnitDirectory: Send + Sync {
    /// The current directory entries.
    async fn units(&self) -> RegionResult<Vec<UnitRef>>;
}

/// Fixed in-memory directory for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct StaticUnitDirectory {
    units: Vec<UnitRef>,
}

impl StaticUnitDirectory {
    pub fn new(units: Vec<UnitRef>) -> Self {
        Self { units }
    }
}

#[async_trait]
impl UnitDirectory for StaticUnitDirectory {
    async fn units(&self) -> RegionResult<Vec<UnitRef>> {
        Ok(self.units.clone())
    }
}
