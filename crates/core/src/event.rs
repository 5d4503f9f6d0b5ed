// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle events, as announced to staff.

use serde::{Deserialize, Serialize};

/// Something that happened to a job that its staff member should hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEvent {
    Assigned,
    Accepted,
    Rejected,
    Started,
    Completed,
    Cancelled,
}

crate::simple_display! {
    JobEvent {
        Assigned => "assigned",
        Accepted => "accepted",
        Rejected => "rejected",
        Started => "started",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl JobEvent {
    /// Human-readable notification title for this event on a given job.
    pub fn title_for(&self, job_title: &str) -> String {
        match self {
            JobEvent::Assigned => format!("New job: {job_title}"),
            JobEvent::Accepted => format!("Job accepted: {job_title}"),
            JobEvent::Rejected => format!("Job declined: {job_title}"),
            JobEvent::Started => format!("Job started: {job_title}"),
            JobEvent::Completed => format!("Job completed: {job_title}"),
            JobEvent::Cancelled => format!("Job cancelled: {job_title}"),
        }
    }
}
