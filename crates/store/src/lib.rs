// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-store: document store abstraction and job store policies
//!
//! The remote store is modeled as named collections of JSON documents.
//! Everything the engine writes goes through [`WriteBatch`], which applies
//! the one centralized sanitize pass (the store's write contract rejects
//! null-placeholder fields) and carries preconditions for guarded commits.

pub mod collections;
pub mod document;
pub mod error;
pub mod jobs;
pub mod memory;
pub mod sanitize;
pub mod store;

pub use collections::CollectionConfig;
pub use document::{from_document, to_document, Document};
pub use error::StoreError;
pub use jobs::JobStore;
pub use memory::MemoryStore;
pub use sanitize::scrub;
pub use store::{DocumentStore, Precondition, WriteBatch, WriteOp};
