// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::checklist::ChecklistItem;
use crate::job::StaffId;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::job::{JobAction, JobStatus, Priority};
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Pending),
            Just(JobStatus::Assigned),
            Just(JobStatus::Accepted),
            Just(JobStatus::Rejected),
            Just(JobStatus::InProgress),
            Just(JobStatus::Completed),
            Just(JobStatus::Cancelled),
        ]
    }

    pub fn arb_job_action() -> impl Strategy<Value = JobAction> {
        prop_oneof![
            Just(JobAction::Accept),
            Just(JobAction::Reject),
            Just(JobAction::Start),
            Just(JobAction::Complete),
            Just(JobAction::Cancel),
        ]
    }

    pub fn arb_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![
            Just(Priority::Low),
            Just(Priority::Medium),
            Just(Priority::High),
            Just(Priority::Urgent),
        ]
    }
}

// ── Factory functions ───────────────────────────────────────────────────

pub fn staff(id: &str) -> StaffId {
    StaffId::from(id)
}

/// A mixed checklist: two required (one done), one optional.
pub fn sample_checklist() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::required("towels").done(),
        ChecklistItem::required("pool skim"),
        ChecklistItem::optional("extra sweep"),
    ]
}
