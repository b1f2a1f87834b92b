use std::sync::Arc;

use tracing::{debug, warn};

use atlas_asset::AssetView;
use atlas_region::{RegionResult, RegionStore};
use atlas_types::{Generation, Point, RectBounds, Region};

use crate::fsm::{DrawEffect, DrawingFsm};

/// Outcome of one pointer interaction step.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOutcome {
    /// Interaction in progress (anchor placed or preview updated);
    /// nothing persisted.
    Pending,
    /// A region was persisted.
    Committed(Region),
    /// Aborted: no code label was set. Surface a missing-code notice.
    MissingLabel,
    /// An in-progress interaction was discarded.
    Cancelled,
}

/// Drives a [`DrawingFsm`] against a [`RegionStore`].
///
/// The controller owns the FSM for the lifetime of the map component and
/// shares the asset's lifecycle: feed it every [`AssetView`] via
/// [`Self::observe_asset`] so a generation change resets any in-progress
/// interaction.
pub struct DrawController {
    fsm: DrawingFsm,
    regions: Arc<RegionStore>,
    generation: Option<Generation>,
}

impl DrawController {
    pub fn new(regions: Arc<RegionStore>) -> Self {
        Self {
            fsm: DrawingFsm::new(),
            regions,
            generation: None,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.fsm.set_label(label);
    }

    pub fn label(&self) -> &str {
        self.fsm.label()
    }

    pub fn is_idle(&self) -> bool {
        self.fsm.is_idle()
    }

    /// Handle a pointer click.
    ///
    /// A completed interaction persists through the region store; if that
    /// write fails the FSM has already returned to idle and the user
    /// re-draws — nothing is retried automatically.
    pub async fn pointer_press(&mut self, point: Point) -> RegionResult<DrawOutcome> {
        match self.fsm.press(point) {
            DrawEffect::Commit { code, bounds } => {
                let region = self
                    .regions
                    .add(
                        &code,
                        Point::new(bounds.x1, bounds.y1),
                        Point::new(bounds.x2, bounds.y2),
                    )
                    .await?;
                Ok(DrawOutcome::Committed(region))
            }
            DrawEffect::MissingLabel => {
                warn!("drawing aborted: no region code set");
                Ok(DrawOutcome::MissingLabel)
            }
            DrawEffect::Cancelled => Ok(DrawOutcome::Cancelled),
            DrawEffect::Preview(_) | DrawEffect::None => Ok(DrawOutcome::Pending),
        }
    }

    /// Handle pointer movement; returns the preview rectangle while anchored.
    pub fn pointer_move(&mut self, point: Point) -> Option<RectBounds> {
        match self.fsm.hover(point) {
            DrawEffect::Preview(bounds) => Some(bounds),
            _ => None,
        }
    }

    /// Discard any in-progress interaction.
    pub fn cancel(&mut self) -> DrawOutcome {
        match self.fsm.cancel() {
            DrawEffect::Cancelled => DrawOutcome::Cancelled,
            _ => DrawOutcome::Pending,
        }
    }

    /// Track the asset the user is drawing over. Any generation change —
    /// including the asset appearing or disappearing — resets the FSM.
    pub fn observe_asset(&mut self, view: &AssetView) {
        let generation = view.generation();
        if generation != self.generation {
            debug!(?generation, "asset generation changed; resetting drawing state");
            self.generation = generation;
            self.fsm.reset();
        }
    }
}
