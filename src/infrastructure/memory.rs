//! In-memory model backend
//!
//! Keeps saved documents in a shared table so tests can assert on what a
//! fixture run persisted without standing up a database.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::adapter::Model;
use crate::domain::{Attributes, Document, ModelName};
use crate::error::BoxError;

/// Attribute a saved document's row id is written to
pub const ID_ATTRIBUTE: &str = "id";

/// Model whose rows live in memory
///
/// Clones share the same table.
#[derive(Debug, Clone)]
pub struct MemoryModel {
    name: ModelName,
    rows: Arc<RwLock<IndexMap<u64, Attributes>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryModel {
    pub fn new(name: impl Into<ModelName>) -> Self {
        Self {
            name: name.into(),
            rows: Arc::new(RwLock::new(IndexMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of rows currently stored
    pub fn count(&self) -> usize {
        self.rows.read().len()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.rows.read().contains_key(&id)
    }

    pub fn find(&self, id: u64) -> Option<Document> {
        let attributes = self.rows.read().get(&id).cloned()?;
        let mut document = self.instantiate();
        for (attribute, value) in attributes {
            document.set(attribute, value);
        }
        Some(document)
    }

    /// Ids of stored rows, oldest first
    pub fn ids(&self) -> Vec<u64> {
        self.rows.read().keys().copied().collect()
    }

    fn row_id(document: &Document) -> Option<u64> {
        document.get(ID_ATTRIBUTE).and_then(Value::as_u64)
    }
}

#[async_trait]
impl Model for MemoryModel {
    fn name(&self) -> ModelName {
        self.name.clone()
    }

    async fn save(&self, document: &mut Document) -> Result<(), BoxError> {
        let id = match Self::row_id(document) {
            Some(id) => id,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                document.set(ID_ATTRIBUTE, id);
                id
            }
        };

        self.rows.write().insert(id, document.attributes().clone());
        Ok(())
    }

    async fn destroy(&self, document: &Document) -> Result<(), BoxError> {
        if let Some(id) = Self::row_id(document) {
            self.rows.write().shift_remove(&id);
        }
        Ok(())
    }
}
