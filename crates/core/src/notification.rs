// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification records: denormalized job event summaries per staff member.

use crate::event::JobEvent;
use crate::job::{Job, JobId, Priority, StaffId};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a notification document.
    pub struct NotificationId("ntf-");
}

/// Fixed expiry offset from creation: 24 hours.
///
/// Expiry only filters stale items on read; it never deletes the record.
pub const NOTIFICATION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Denormalized job summary carried on every notification so the
/// notification list renders without a follow-up job fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub property: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at_ms: Option<u64>,
}

impl JobSummary {
    pub fn of(job: &Job) -> Self {
        Self {
            property: job.property.clone(),
            priority: job.priority,
            scheduled_at_ms: job.scheduled_at_ms,
        }
    }
}

/// A side-effect record informing a staff member of a job event.
///
/// `staff_id` must equal the job's `assigned_staff_id` exactly; it is the
/// sole correctness condition for delivery. Mutated only to flip `read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub staff_id: StaffId,
    pub job_id: JobId,
    pub event: JobEvent,
    pub title: String,
    pub summary: JobSummary,
    pub created_at_ms: u64,
    pub expires_at_ms: u64,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// Build the notification for an event on a job, addressed to `staff_id`.
    pub fn for_event(job: &Job, staff_id: StaffId, event: JobEvent, now_ms: u64) -> Self {
        Self {
            id: NotificationId::new(),
            staff_id,
            job_id: job.id.clone(),
            event,
            title: event.title_for(&job.title),
            summary: JobSummary::of(job),
            created_at_ms: now_ms,
            expires_at_ms: now_ms + NOTIFICATION_TTL_MS,
            read: false,
        }
    }

    /// Stale per the client-side filtering contract.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
