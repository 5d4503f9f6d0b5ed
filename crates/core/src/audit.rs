// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit sessions: background execution telemetry, one per job.
//!
//! Read only by offline analysis, never by the staff-facing client. The
//! session is created on job start, appended to during execution, and
//! finalized once on completion — never deleted.

use crate::checklist::{required_completion_rate, ChecklistItem, ChecklistItemId};
use crate::job::{JobId, StaffId};
use crate::location::GpsSample;
use crate::photo::{PhotoId, PhotoPhase};
use serde::{Deserialize, Serialize};

/// A checklist item's completion flag flipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEvent {
    pub item_id: ChecklistItemId,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub at_ms: u64,
}

/// A photo was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoEvent {
    pub photo_id: PhotoId,
    pub phase: PhotoPhase,
    pub at_ms: u64,
}

/// One staff member's execution record for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSession {
    pub job_id: JobId,
    pub staff_id: StaffId,
    pub opened_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_gps: Option<GpsSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_gps: Option<GpsSample>,
    #[serde(default)]
    pub checklist_events: Vec<ChecklistEvent>,
    #[serde(default)]
    pub photo_events: Vec<PhotoEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Completed required items / total required items; written at close.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_rate: Option<f64>,
    /// Wall-clock minutes from open to close; written at close.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<u32>,
}

impl AuditSession {
    /// Open a session at job start. The GPS sample is best-effort and may
    /// be absent.
    pub fn open(job_id: JobId, staff_id: StaffId, now_ms: u64, start_gps: Option<GpsSample>) -> Self {
        Self {
            job_id,
            staff_id,
            opened_at_ms: now_ms,
            closed_at_ms: None,
            start_gps,
            end_gps: None,
            checklist_events: Vec::new(),
            photo_events: Vec::new(),
            notes: None,
            completion_rate: None,
            total_minutes: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at_ms.is_some()
    }

    /// Append a checklist flip. Prior events for other items are never
    /// overwritten. No-op after close.
    pub fn record_checklist(
        &mut self,
        item_id: ChecklistItemId,
        completed: bool,
        note: Option<String>,
        now_ms: u64,
    ) {
        if self.is_closed() {
            return;
        }
        self.checklist_events.push(ChecklistEvent { item_id, completed, note, at_ms: now_ms });
    }

    /// Append a photo capture. No-op after close.
    pub fn record_photo(&mut self, photo_id: PhotoId, phase: PhotoPhase, now_ms: u64) {
        if self.is_closed() {
            return;
        }
        self.photo_events.push(PhotoEvent { photo_id, phase, at_ms: now_ms });
    }

    /// Finalize the session: stamp the close, store derived metrics, and
    /// make the record immutable. Idempotent — a second close is a no-op.
    pub fn close(
        &mut self,
        end_gps: Option<GpsSample>,
        final_notes: Option<String>,
        final_checklist: &[ChecklistItem],
        now_ms: u64,
    ) {
        if self.is_closed() {
            return;
        }
        self.closed_at_ms = Some(now_ms);
        self.end_gps = end_gps;
        self.notes = final_notes;
        self.completion_rate = Some(required_completion_rate(final_checklist));
        self.total_minutes = Some((now_ms.saturating_sub(self.opened_at_ms) / 60_000) as u32);
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
