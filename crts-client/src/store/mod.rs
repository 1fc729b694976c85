//! Document store contract
//!
//! The backend keeps records as schemaless documents in named collections,
//! with one level of sub-collections for per-document histories. The
//! contract is pluggable: [`RestStore`] talks to the hosted backend over
//! HTTP, [`MemoryStore`] keeps everything in process for tests, the mock
//! server and demos.

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ClientResult;

/// One stored document: the store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    /// Deserialize the document fields into a typed record.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// Schemaless document store.
///
/// `update` merges top-level fields into an existing document and fails
/// with `NotFound` when the id does not resolve; `get` answers `None`
/// instead. Queries order documents by one field's string value, so
/// fixed-width timestamps sort chronologically.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Fetch one document, `None` when absent.
    async fn get(&self, collection: &str, id: &str) -> ClientResult<Option<Document>>;

    /// Create or replace a document under a caller-chosen id.
    async fn put(&self, collection: &str, id: &str, data: Value) -> ClientResult<()>;

    /// Merge fields into an existing document.
    async fn update(&self, collection: &str, id: &str, data: Value) -> ClientResult<()>;

    /// Add a document under a store-assigned id, returning the id.
    async fn add(&self, collection: &str, data: Value) -> ClientResult<String>;

    /// All documents of a collection, ordered by `order_by`.
    async fn query_all(
        &self,
        collection: &str,
        order_by: &str,
        desc: bool,
    ) -> ClientResult<Vec<Document>>;

    /// Add a document to a sub-collection, returning the new id.
    async fn add_child(
        &self,
        collection: &str,
        parent_id: &str,
        child: &str,
        data: Value,
    ) -> ClientResult<String>;

    /// All documents of a sub-collection, ordered by `order_by`.
    async fn query_children(
        &self,
        collection: &str,
        parent_id: &str,
        child: &str,
        order_by: &str,
        desc: bool,
    ) -> ClientResult<Vec<Document>>;
}
