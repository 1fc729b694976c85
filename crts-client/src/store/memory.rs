//! In-memory document store

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{Document, DocumentStore};
use crate::{ClientError, ClientResult};

/// In-process implementation of the store contract.
///
/// Collections are keyed by path: a top-level collection by its name, a
/// sub-collection as `{collection}/{parent_id}/{child}`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn child_path(collection: &str, parent_id: &str, child: &str) -> String {
        format!("{collection}/{parent_id}/{child}")
    }

    fn insert_new(&self, path: &str, data: Value) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.collections
            .entry(path.to_string())
            .or_default()
            .insert(id.clone(), data);
        id
    }

    fn sorted(&self, path: &str, order_by: &str, desc: bool) -> Vec<Document> {
        let Some(collection) = self.collections.get(path) else {
            return Vec::new();
        };
        let mut documents: Vec<Document> = collection
            .iter()
            .map(|entry| Document {
                id: entry.key().clone(),
                data: entry.value().clone(),
            })
            .collect();
        documents.sort_by(|a, b| {
            let ordering = sort_key(&a.data, order_by).cmp(&sort_key(&b.data, order_by));
            if desc { ordering.reverse() } else { ordering }
        });
        documents
    }
}

fn sort_key(data: &Value, field: &str) -> String {
    match data.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Merge the patch's top-level fields into the target document.
fn merge_fields(target: &mut Value, patch: Value) {
    match (&mut *target, patch) {
        (Value::Object(fields), Value::Object(patch)) => {
            for (key, value) in patch {
                fields.insert(key, value);
            }
        }
        (slot, patch) => *slot = patch,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> ClientResult<Option<Document>> {
        let Some(col) = self.collections.get(collection) else {
            return Ok(None);
        };
        Ok(col.get(id).map(|entry| Document {
            id: id.to_string(),
            data: entry.value().clone(),
        }))
    }

    async fn put(&self, collection: &str, id: &str, data: Value) -> ClientResult<()> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> ClientResult<()> {
        let col = self
            .collections
            .get(collection)
            .ok_or_else(|| ClientError::NotFound(format!("{collection}/{id}")))?;
        let mut entry = col
            .get_mut(id)
            .ok_or_else(|| ClientError::NotFound(format!("{collection}/{id}")))?;
        merge_fields(entry.value_mut(), data);
        Ok(())
    }

    async fn add(&self, collection: &str, data: Value) -> ClientResult<String> {
        Ok(self.insert_new(collection, data))
    }

    async fn query_all(
        &self,
        collection: &str,
        order_by: &str,
        desc: bool,
    ) -> ClientResult<Vec<Document>> {
        Ok(self.sorted(collection, order_by, desc))
    }

    async fn add_child(
        &self,
        collection: &str,
        parent_id: &str,
        child: &str,
        data: Value,
    ) -> ClientResult<String> {
        Ok(self.insert_new(&Self::child_path(collection, parent_id, child), data))
    }

    async fn query_children(
        &self,
        collection: &str,
        parent_id: &str,
        child: &str,
        order_by: &str,
        desc: bool,
    ) -> ClientResult<Vec<Document>> {
        Ok(self.sorted(&Self::child_path(collection, parent_id, child), order_by, desc))
    }
}
