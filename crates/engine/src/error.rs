// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle error taxonomy.
//!
//! Guard failures are specific enough for the UI to tell "already handled
//! by someone else" from "does not exist" from "network error".

use dispatch_core::{JobAction, JobId, JobStatus};
use dispatch_store::StoreError;
use thiserror::Error;

/// Errors from job lifecycle operations
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Job id resolves in neither active collection.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// The requested transition is illegal from the job's current status.
    #[error("cannot {action} a job that is {status}")]
    InvalidTransition {
        action: JobAction,
        status: JobStatus,
    },

    /// The acting staff member is not the job's assigned staff member.
    #[error("job {job_id} is assigned to another staff member")]
    Forbidden { job_id: JobId },

    /// Underlying store failure; transient variants are safe to retry.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LifecycleError {
    /// True when retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, LifecycleError::Store(e) if e.is_transient())
    }
}
