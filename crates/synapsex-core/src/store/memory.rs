//! In-memory [`DocumentStore`] implementation.
//!
//! Documents live in a `Vec` behind `std::sync::RwLock`, so iteration order
//! is insertion order and ties in search ranking fall back to it. Nothing is
//! ever written to disk.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use crate::models::Document;

use super::DocumentStore;

/// In-memory document store.
pub struct InMemoryStore {
    docs: RwLock<Vec<Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }

    /// Build a store pre-populated with `docs`, keeping their order.
    ///
    /// Later duplicates of an ID are dropped.
    pub fn with_documents(docs: Vec<Document>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(docs.len());
        let mut unique: Vec<Document> = Vec::with_capacity(docs.len());
        for doc in docs {
            if !seen.insert(doc.id.clone()) {
                tracing::warn!(id = %doc.id, "dropping duplicate document id");
                continue;
            }
            unique.push(doc);
        }
        Self {
            docs: RwLock::new(unique),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Document>>> {
        self.docs
            .read()
            .map_err(|_| anyhow!("document store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Document>>> {
        self.docs
            .write()
            .map_err(|_| anyhow!("document store lock poisoned"))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(self.read()?.clone())
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        Ok(self.read()?.iter().find(|d| d.id == id).cloned())
    }

    async fn insert_document(&self, doc: Document) -> Result<()> {
        let mut docs = self.write()?;
        if docs.iter().any(|d| d.id == doc.id) {
            bail!("document already exists: {}", doc.id);
        }
        docs.push(doc);
        Ok(())
    }

    async fn remove_document(&self, id: &str) -> Result<bool> {
        let mut docs = self.write()?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() != before)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
