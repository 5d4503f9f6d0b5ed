// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory document store with the same atomicity semantics as the
//! remote store. Used for local runs and for every test in this workspace.

use crate::document::Document;
use crate::error::StoreError;
use crate::store::{DocumentStore, Precondition, WriteBatch, WriteOp};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Default)]
struct Shared {
    collections: HashMap<String, BTreeMap<String, Document>>,
    /// Remaining commits to fail with a transient error (fault injection).
    fail_commits: u32,
    /// Remaining commits to reject with a conflict (fault injection).
    conflict_commits: u32,
}

/// In-memory [`DocumentStore`]. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Shared>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` commits fail with [`StoreError::Transient`].
    pub fn fail_next_commits(&self, n: u32) {
        self.inner.write().fail_commits = n;
    }

    /// Make the next `n` commits fail with [`StoreError::Conflict`], as if
    /// a precondition lost a race.
    pub fn conflict_next_commits(&self, n: u32) {
        self.inner.write().conflict_commits = n;
    }

    /// Number of documents currently in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.inner
            .read()
            .collections
            .get(collection)
            .map_or(0, |c| c.len())
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn check(shared: &Shared, precondition: &Precondition) -> Result<(), StoreError> {
        let (collection, id, detail) = match precondition {
            Precondition::FieldEquals { collection, id, field, value } => {
                let doc = Self::lookup(shared, collection, id);
                match doc.and_then(|d| d.get(field)) {
                    Some(actual) if actual == value => return Ok(()),
                    Some(actual) => {
                        (collection, id, format!("{field} is {actual}, expected {value}"))
                    }
                    None => (collection, id, format!("{field} absent, expected {value}")),
                }
            }
            Precondition::FieldAbsent { collection, id, field } => {
                match Self::lookup(shared, collection, id) {
                    Some(doc) if !doc.contains_key(field) => return Ok(()),
                    Some(_) => (collection, id, format!("{field} present, expected absent")),
                    None => (collection, id, "document missing".to_string()),
                }
            }
            Precondition::Exists { collection, id } => {
                if Self::lookup(shared, collection, id).is_some() {
                    return Ok(());
                }
                (collection, id, "document missing".to_string())
            }
        };
        Err(StoreError::Conflict {
            collection: collection.clone(),
            id: id.clone(),
            detail,
        })
    }

    fn lookup<'a>(shared: &'a Shared, collection: &str, id: &str) -> Option<&'a Document> {
        shared.collections.get(collection).and_then(|c| c.get(id))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let shared = self.inner.read();
        Ok(Self::lookup(&shared, collection, id).cloned())
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Document)>, StoreError> {
        let shared = self.inner.read();
        let Some(docs) = shared.collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(_, doc)| doc.get(field) == Some(value))
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut shared = self.inner.write();
        if shared.fail_commits > 0 {
            shared.fail_commits -= 1;
            return Err(StoreError::Transient("injected commit failure".into()));
        }
        if shared.conflict_commits > 0 {
            shared.conflict_commits -= 1;
            let (collection, id) = match batch.ops.first() {
                Some(WriteOp::Set { collection, id, .. })
                | Some(WriteOp::Delete { collection, id }) => (collection.clone(), id.clone()),
                None => (String::new(), String::new()),
            };
            return Err(StoreError::Conflict {
                collection,
                id,
                detail: "injected conflict".into(),
            });
        }
        for precondition in &batch.preconditions {
            Self::check(&shared, precondition)?;
        }
        for op in batch.ops {
            match op {
                WriteOp::Set { collection, id, doc } => {
                    shared.collections.entry(collection).or_default().insert(id, doc);
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(docs) = shared.collections.get_mut(&collection) {
                        docs.remove(&id);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
