// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document store trait and guarded write batches.

use crate::document::Document;
use crate::error::StoreError;
use crate::sanitize;
use async_trait::async_trait;
use serde_json::Value;

/// A condition the whole batch depends on. Checked atomically with the
/// batch's writes; any failed condition fails the entire commit with
/// [`StoreError::Conflict`] and applies nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Precondition {
    /// Document exists and `field` equals `value`.
    FieldEquals {
        collection: String,
        id: String,
        field: String,
        value: Value,
    },
    /// Document exists and `field` is not present on it.
    FieldAbsent {
        collection: String,
        id: String,
        field: String,
    },
    /// Document exists.
    Exists { collection: String, id: String },
}

/// One write in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Set {
        collection: String,
        id: String,
        doc: Document,
    },
    Delete { collection: String, id: String },
}

/// An all-or-nothing group of writes plus the preconditions guarding them.
///
/// `set` runs the centralized sanitize pass, so no writer can forward a
/// null-placeholder field to the store.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WriteBatch {
    pub ops: Vec<WriteOp>,
    pub preconditions: Vec<Precondition>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, collection: impl Into<String>, id: impl Into<String>, mut doc: Document) -> Self {
        sanitize::scrub(&mut doc);
        self.ops.push(WriteOp::Set { collection: collection.into(), id: id.into(), doc });
        self
    }

    pub fn delete(mut self, collection: impl Into<String>, id: impl Into<String>) -> Self {
        self.ops.push(WriteOp::Delete { collection: collection.into(), id: id.into() });
        self
    }

    pub fn require(mut self, precondition: Precondition) -> Self {
        self.preconditions.push(precondition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Adapter for the remote document store.
///
/// Writes from a single client are ordered per document; no ordering is
/// guaranteed across documents. `commit` is atomic: every op lands or none
/// does.
#[async_trait]
pub trait DocumentStore: Clone + Send + Sync + 'static {
    /// Fetch one document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// All documents in `collection` where `field` equals `value`.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Document)>, StoreError>;

    /// Apply a batch atomically, checking its preconditions first.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// Write one document (sanitized, unguarded).
    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        self.commit(WriteBatch::new().set(collection, id, doc)).await
    }

    /// Delete one document (unguarded; absent documents are fine).
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.commit(WriteBatch::new().delete(collection, id)).await
    }
}
