//! Document-store abstraction for Atlas.
//!
//! Models the hosted document database the system persists into: named
//! collections of JSON documents, point-in-time atomic write batches, and
//! push-based change notification per collection. Individual documents are
//! size-capped by the backing service, which is why large assets are stored
//! as chunk sequences (see `atlas-asset`).
//!
//! # Concurrency Model
//!
//! There are no per-document locks. Ordering between concurrent writers is
//! determined solely by commit sequencing: last commit wins, no merge.
//! Reads are push-based — consumers hold a [`CollectionWatch`] and re-read
//! the full collection on every [`ChangeNotice`] rather than polling.
//!
//! # Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocumentStore`] — `HashMap`-based store for tests and embedding

pub mod batch;
pub mod document;
pub mod error;
pub mod gate;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use batch::{WriteBatch, WriteOp};
pub use document::Document;
pub use error::{StoreError, StoreResult};
pub use gate::{AccessGate, AllowAll, DenyAll, WriteAction};
pub use memory::InMemoryDocumentStore;
pub use traits::{ChangeNotice, CollectionWatch, DocumentStore};
