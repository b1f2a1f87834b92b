//! Foundation types for Atlas.
//!
//! This crate provides the core identifiers and value types used throughout
//! the Atlas system. Every other Atlas crate depends on `atlas-types`.
//!
//! # Key Types
//!
//! - [`AssetScope`] — Names one logical binary asset and its chunk collection
//! - [`Generation`] — Monotonic marker for one version of an asset's chunk set
//! - [`Chunk`] — One ordered segment of an encoded asset payload
//! - [`Point`] / [`RectBounds`] — Percentage-normalized map geometry
//! - [`Region`] — A labeled rectangular annotation over the asset
//! - [`UnitRef`] — Read-only projection of an external unit-directory entry

pub mod asset;
pub mod error;
pub mod geometry;
pub mod region;
pub mod unit;

pub use asset::{AssetScope, Chunk, Generation};
pub use error::TypeError;
pub use geometry::{Point, RectBounds};
pub use region::{Region, RegionId};
pub use unit::UnitRef;
