// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job record and status state machine.

use crate::checklist::ChecklistItem;
use crate::clock::Clock;
use crate::duration;
use crate::location::Location;
use crate::photo::PhotoRef;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

crate::define_id! {
    /// Unique identifier for a job.
    ///
    /// Assigned at creation and stable across the job's whole life,
    /// including the move into the archive collection.
    pub struct JobId("job-");
}

crate::define_id! {
    /// Durable staff identity.
    ///
    /// This is the auth identity, never a display name or staff-record
    /// document id. It is the join key for notifications and audit
    /// sessions; a job and its notifications must carry the exact same
    /// value or delivery silently fails.
    pub struct StaffId("stf-");
}

/// Job priority, ordered low → urgent for queue sorting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

crate::simple_display! {
    Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

/// Status of a job. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Created, not yet offered to anyone
    Pending,
    /// Offered to a specific staff member, not yet accepted
    Assigned,
    /// Staff member committed to the job
    Accepted,
    /// Staff member declined (terminal)
    Rejected,
    /// Work underway
    InProgress,
    /// Finished and archived (terminal; only ever seen on archived copies)
    Completed,
    /// Called off by staff or admin (terminal)
    Cancelled,
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Assigned => "assigned",
        Accepted => "accepted",
        Rejected => "rejected",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

/// A transition request against the job state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobAction {
    Accept,
    Reject,
    Start,
    Complete,
    Cancel,
}

crate::simple_display! {
    JobAction {
        Accept => "accept",
        Reject => "reject",
        Start => "start",
        Complete => "complete",
        Cancel => "cancel",
    }
}

impl JobStatus {
    /// Check if this status is terminal (no further transitions accepted).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Rejected | JobStatus::Completed | JobStatus::Cancelled
        )
    }

    /// The single legal path through job states:
    ///
    /// ```text
    /// pending/assigned --accept--> accepted --start--> in_progress --complete--> completed
    /// pending/assigned --reject--> rejected   (terminal)
    /// any non-terminal --cancel--> cancelled  (terminal)
    /// ```
    pub fn allows(&self, action: JobAction) -> bool {
        match action {
            JobAction::Accept | JobAction::Reject => {
                matches!(self, JobStatus::Pending | JobStatus::Assigned)
            }
            JobAction::Start => matches!(self, JobStatus::Accepted),
            JobAction::Complete => matches!(self, JobStatus::InProgress),
            JobAction::Cancel => !self.is_terminal(),
        }
    }
}

/// Configuration for creating a new job
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub id: JobId,
    pub title: String,
    pub property: String,
    pub priority: Priority,
    pub assigned_staff_id: Option<StaffId>,
    pub scheduled_at_ms: Option<u64>,
    pub estimated_minutes: u32,
    pub location: Location,
    pub checklist: Vec<ChecklistItem>,
}

impl JobConfig {
    pub fn builder(title: impl Into<String>, property: impl Into<String>) -> JobConfigBuilder {
        JobConfigBuilder {
            id: JobId::new(),
            title: title.into(),
            property: property.into(),
            priority: Priority::default(),
            assigned_staff_id: None,
            scheduled_at_ms: None,
            estimated_minutes: duration::DEFAULT_ESTIMATED_MINUTES,
            location: Location::address(""),
            checklist: Vec::new(),
        }
    }
}

pub struct JobConfigBuilder {
    id: JobId,
    title: String,
    property: String,
    priority: Priority,
    assigned_staff_id: Option<StaffId>,
    scheduled_at_ms: Option<u64>,
    estimated_minutes: u32,
    location: Location,
    checklist: Vec<ChecklistItem>,
}

impl JobConfigBuilder {
    pub fn id(mut self, id: impl Into<JobId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn assigned_to(mut self, staff: impl Into<StaffId>) -> Self {
        self.assigned_staff_id = Some(staff.into());
        self
    }

    pub fn scheduled_at_ms(mut self, at: u64) -> Self {
        self.scheduled_at_ms = Some(at);
        self
    }

    /// Estimated duration from a loosely-typed upstream value.
    pub fn estimated(mut self, value: &serde_json::Value) -> Self {
        self.estimated_minutes = duration::parse_estimated_minutes(value);
        self
    }

    pub fn estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = minutes;
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn checklist(mut self, items: Vec<ChecklistItem>) -> Self {
        self.checklist = items;
        self
    }

    pub fn build(self) -> JobConfig {
        JobConfig {
            id: self.id,
            title: self.title,
            property: self.property,
            priority: self.priority,
            assigned_staff_id: self.assigned_staff_id,
            scheduled_at_ms: self.scheduled_at_ms,
            estimated_minutes: self.estimated_minutes,
            location: self.location,
            checklist: self.checklist,
        }
    }
}

/// One unit of work assigned to one staff member at one property.
///
/// Phase timestamps are set exactly once, by the transition that reaches
/// that phase, and never overwritten. A timestamp is present iff the job
/// has passed through the phase. `completed_at_ms` never appears here —
/// completion moves the job into the archive as an [`ArchivedJob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub property: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_staff_id: Option<StaffId>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at_ms: Option<u64>,
    #[serde(
        default = "duration::default_minutes",
        deserialize_with = "duration::deserialize_minutes"
    )]
    pub estimated_minutes: u32,
    pub location: Location,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    pub created_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

impl Job {
    /// Create a new job. Pre-assigned jobs start `assigned` with
    /// `assigned_at_ms` stamped; unassigned jobs start `pending`.
    pub fn new(config: JobConfig, clock: &impl Clock) -> Self {
        let now = clock.epoch_ms();
        let assigned = config.assigned_staff_id.is_some();
        Self {
            id: config.id,
            title: config.title,
            property: config.property,
            priority: config.priority,
            assigned_staff_id: config.assigned_staff_id,
            status: if assigned { JobStatus::Assigned } else { JobStatus::Pending },
            scheduled_at_ms: config.scheduled_at_ms,
            estimated_minutes: config.estimated_minutes,
            location: config.location,
            checklist: config.checklist,
            photos: Vec::new(),
            created_at_ms: now,
            assigned_at_ms: assigned.then_some(now),
            accepted_at_ms: None,
            started_at_ms: None,
            rejection_reason: None,
            cancellation_reason: None,
        }
    }

    /// Check if the job is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply an accept transition. Caller has already validated legality
    /// and the ownership guard. Stamps `accepted_at_ms` once; claims the
    /// job when it was unassigned.
    pub fn apply_accept(&mut self, staff: &StaffId, now_ms: u64) {
        if self.assigned_staff_id.is_none() {
            self.assigned_staff_id = Some(staff.clone());
            self.assigned_at_ms.get_or_insert(now_ms);
        }
        self.status = JobStatus::Accepted;
        self.accepted_at_ms.get_or_insert(now_ms);
    }

    /// Apply a reject transition (terminal).
    pub fn apply_reject(&mut self, reason: impl Into<String>) {
        self.status = JobStatus::Rejected;
        self.rejection_reason = Some(reason.into());
    }

    /// Apply a start transition. Stamps `started_at_ms` once.
    pub fn apply_start(&mut self, now_ms: u64) {
        self.status = JobStatus::InProgress;
        self.started_at_ms.get_or_insert(now_ms);
    }

    /// Apply a cancel transition (terminal).
    pub fn apply_cancel(&mut self, reason: impl Into<String>) {
        self.status = JobStatus::Cancelled;
        self.cancellation_reason = Some(reason.into());
    }

    /// Sort key for staff job queues: urgent first, then earliest schedule.
    pub fn queue_key(&self) -> (Reverse<Priority>, u64) {
        (Reverse(self.priority), self.scheduled_at_ms.unwrap_or(u64::MAX))
    }
}

/// Archived copy of a completed job: every original field plus the
/// completion enrichment. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedJob {
    #[serde(flatten)]
    pub job: Job,
    pub completed_at_ms: u64,
    pub completed_by: StaffId,
    /// Wall-clock minutes from `started_at_ms` to `completed_at_ms`.
    pub actual_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_notes: Option<String>,
}

/// Test builder with sensible defaults.
#[cfg(any(test, feature = "test-support"))]
pub struct JobBuilder {
    config: JobConfigBuilder,
    status: Option<JobStatus>,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for JobBuilder {
    fn default() -> Self {
        Self {
            config: JobConfig::builder("Pool cleaning", "Villa Sunrise")
                .id("job-test-1")
                .location(Location::address("12 Soi Naya, Rawai")),
            status: None,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobBuilder {
    pub fn id(mut self, id: impl Into<JobId>) -> Self {
        self.config = self.config.id(id);
        self
    }

    pub fn assigned_to(mut self, staff: impl Into<StaffId>) -> Self {
        self.config = self.config.assigned_to(staff);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.config = self.config.priority(priority);
        self
    }

    pub fn scheduled_at_ms(mut self, at: u64) -> Self {
        self.config = self.config.scheduled_at_ms(at);
        self
    }

    pub fn checklist(mut self, items: Vec<ChecklistItem>) -> Self {
        self.config = self.config.checklist(items);
        self
    }

    /// Force a status after construction (bypasses transition stamping).
    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self, clock: &impl Clock) -> Job {
        let mut job = Job::new(self.config.build(), clock);
        if let Some(status) = self.status {
            job.status = status;
        }
        job
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Job {
    /// Create a builder with test defaults.
    pub fn builder() -> JobBuilder {
        JobBuilder::default()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
