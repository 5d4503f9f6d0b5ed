// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store error taxonomy.

use thiserror::Error;

/// Errors from document store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Retryable failure (network, timeout). The core never retries on its
    /// own; callers decide.
    #[error("transient store failure: {0}")]
    Transient(String),

    /// A batch precondition did not hold at commit time.
    #[error("write conflict on {collection}/{id}: {detail}")]
    Conflict {
        collection: String,
        id: String,
        detail: String,
    },

    /// Document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Attempted to store a non-object value as a document.
    #[error("document must be a JSON object")]
    NotAnObject,
}

impl StoreError {
    /// True for failures that are safe to retry as-is.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}
