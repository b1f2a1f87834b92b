use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;

/// A single record in a store collection: an id plus a JSON body.
///
/// The store never interprets document bodies — typed access goes through
/// [`Document::encode`] and [`Document::decode`].
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: serde_json::Value,
}

impl Document {
    /// Build a document by serializing a typed value.
    pub fn encode<T: Serialize>(id: impl Into<String>, value: &T) -> StoreResult<Self> {
        Ok(Self {
            id: id.into(),
            body: serde_json::to_value(value)?,
        })
    }

    /// Deserialize the body into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> StoreResult<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}
