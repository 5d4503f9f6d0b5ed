// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-core: domain types for the dispatch job lifecycle system

pub mod macros;

pub mod audit;
pub mod checklist;
pub mod clock;
pub mod duration;
pub mod event;
pub mod job;
pub mod location;
pub mod notification;
pub mod photo;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use audit::{AuditSession, ChecklistEvent, PhotoEvent};
pub use checklist::{required_completion_rate, ChecklistItem, ChecklistItemId};
pub use clock::{Clock, FakeClock, SystemClock};
pub use duration::parse_estimated_minutes;
pub use event::JobEvent;
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{
    ArchivedJob, Job, JobAction, JobConfig, JobConfigBuilder, JobId, JobStatus, Priority, StaffId,
};
pub use location::{GeoPoint, GpsSample, Location};
pub use notification::{JobSummary, Notification, NotificationId, NOTIFICATION_TTL_MS};
pub use photo::{PhotoId, PhotoPhase, PhotoRef};
