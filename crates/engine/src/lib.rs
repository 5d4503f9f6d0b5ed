// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-engine: the job lifecycle engine
//!
//! Validates and applies status transitions, archives completed jobs
//! atomically across collections, emits notification records, and keeps
//! the background audit session log.

pub mod archiver;
pub mod audit;
pub mod error;
pub mod gps;
pub mod lifecycle;
pub mod notify;
pub mod photos;

pub use archiver::Archiver;
pub use audit::AuditLog;
pub use error::LifecycleError;
#[cfg(any(test, feature = "test-support"))]
pub use gps::FakeLocationSource;
pub use gps::{LocationSource, NoLocation};
pub use lifecycle::{
    CompletionOutcome, CompletionPayload, CreationOutcome, Lifecycle, StaffContext,
    TransitionOutcome,
};
pub use notify::{Notifier, LEGACY_STAFF_FIELDS};
#[cfg(any(test, feature = "test-support"))]
pub use photos::FakePhotoUploader;
pub use photos::{DirectUrlUploader, PhotoCapture, PhotoUploader, UploadError};
