//! Region annotation store for Atlas.
//!
//! Regions are user-drawn, percentage-normalized rectangles labeled with a
//! grouping code. Each region is its own document in a keyed collection, so
//! concurrent adds and deletes from different clients are independent
//! commits rather than racing rewrites of a shared array. All clients
//! observe changes through a [`RegionFeed`] on the same push-based
//! subscription mechanism the asset pipeline uses.

pub mod directory;
pub mod error;
pub mod feed;
pub mod store;

pub use directory::{StaticUnitDirectory, UnitDirectory};
pub use error::{RegionError, RegionResult};
pub use feed::RegionFeed;
pub use store::RegionStore;
