use std::collections::BTreeSet;

use crate::document::Document;

/// A single operation within an atomic write batch.
#[derive(Clone, Debug)]
pub enum WriteOp {
    /// Insert or replace one document.
    Put { collection: String, doc: Document },
    /// Remove one document. Removing an absent id is not an error.
    Delete { collection: String, id: String },
    /// Remove every document in a collection.
    ///
    /// Combined with subsequent `Put`s this gives delete-all-then-insert-all
    /// replacement in a single commit.
    ClearCollection { collection: String },
}

impl WriteOp {
    /// The collection this operation touches.
    pub fn collection(&self) -> &str {
        match self {
            Self::Put { collection, .. }
            | Self::Delete { collection, .. }
            | Self::ClearCollection { collection } => collection,
        }
    }
}

/// An ordered set of write operations committed all-or-nothing.
///
/// Operations apply in insertion order, so a `ClearCollection` followed by
/// `Put`s replaces a collection's contents wholesale.
#[derive(Clone, Debug, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a document insert/replace.
    pub fn put(&mut self, collection: impl Into<String>, doc: Document) -> &mut Self {
        self.ops.push(WriteOp::Put {
            collection: collection.into(),
            doc,
        });
        self
    }

    /// Queue a document delete.
    pub fn delete(&mut self, collection: impl Into<String>, id: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection: collection.into(),
            id: id.into(),
        });
        self
    }

    /// Queue a whole-collection clear.
    pub fn clear_collection(&mut self, collection: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::ClearCollection {
            collection: collection.into(),
        });
        self
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if no operations are queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The operations in application order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Sorted, deduplicated set of collections this batch touches.
    pub fn collections(&self) -> BTreeSet<String> {
        self.ops
            .iter()
            .map(|op| op.collection().to_string())
            .collect()
    }
}
