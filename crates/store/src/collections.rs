// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collection name configuration.
//!
//! Active jobs are split across two historically distinct collections.
//! Neither may be dropped from reads: omitting either silently hides jobs
//! from the affected staff member.

/// Names of the collections this system reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    /// The two legacy active-job collections, checked in order. New jobs
    /// are written to the first; reads always cover both.
    pub active: [String; 2],
    /// Permanent archive of completed jobs.
    pub archive: String,
    /// Notification records per staff member.
    pub notifications: String,
    /// Background audit sessions, one per job.
    pub audit_sessions: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            active: ["jobs".into(), "staff_jobs".into()],
            archive: "completed_jobs".into(),
            notifications: "notifications".into(),
            audit_sessions: "job_audit_sessions".into(),
        }
    }
}
