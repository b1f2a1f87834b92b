//! Two-click drawing interaction for Atlas.
//!
//! Turning pointer input into persisted regions is split in two:
//!
//! - [`DrawingFsm`] — a pure state machine over normalized coordinates,
//!   independent of any input-event dispatch mechanism. First click anchors,
//!   second click yields a normalized rectangle; an empty label aborts the
//!   interaction instead of persisting.
//! - [`DrawController`] — wires committed rectangles into
//!   [`RegionStore`](atlas_region::RegionStore) and resets the FSM whenever
//!   the underlying asset generation changes, so stale anchors never survive
//!   an asset swap.
//!
//! All FSM state is transient and process-local; nothing here is persisted
//! except through the region store.

pub mod controller;
pub mod fsm;

pub use controller::{DrawController, DrawOutcome};
pub use fsm::{DrawEffect, DrawState, DrawingFsm};
