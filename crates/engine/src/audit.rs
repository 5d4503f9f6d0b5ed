// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit session logger.
//!
//! Invisible to staff: every method swallows failures after logging them,
//! because audit telemetry must never block or visibly affect the staff
//! member's ability to do their job. Sessions are keyed by job id and
//! finalized exactly once on completion.

use crate::gps::LocationSource;
use dispatch_core::{
    AuditSession, ChecklistItem, ChecklistItemId, Clock, Job, JobId, PhotoId, PhotoPhase, StaffId,
};
use dispatch_store::{from_document, to_document, CollectionConfig, DocumentStore, StoreError};

/// Background recorder of job execution telemetry.
#[derive(Clone)]
pub struct AuditLog<S, L, C> {
    store: S,
    config: CollectionConfig,
    locations: L,
    clock: C,
}

impl<S, L, C> AuditLog<S, L, C>
where
    S: DocumentStore,
    L: LocationSource,
    C: Clock,
{
    pub fn new(store: S, config: CollectionConfig, locations: L, clock: C) -> Self {
        Self { store, config, locations, clock }
    }

    /// Open a session at job start, with a best-effort GPS sample.
    /// Returns whether the session record was written.
    pub async fn open(&self, job: &Job, staff: &StaffId) -> bool {
        let gps = self.locations.sample().await;
        let session = AuditSession::open(
            job.id.clone(),
            staff.clone(),
            self.clock.epoch_ms(),
            gps,
        );
        match self.write(&session).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(job_id = %job.id, error = %e, "audit session open failed");
                false
            }
        }
    }

    /// Append a checklist flip to the session.
    pub async fn record_checklist(
        &self,
        job_id: &JobId,
        item_id: &ChecklistItemId,
        completed: bool,
        note: Option<String>,
    ) {
        let now = self.clock.epoch_ms();
        let result = self
            .update(job_id, |session| {
                session.record_checklist(item_id.clone(), completed, note, now);
            })
            .await;
        if let Err(e) = result {
            tracing::warn!(job_id = %job_id, error = %e, "audit checklist event failed");
        }
    }

    /// Append a photo capture to the session.
    pub async fn record_photo(&self, job_id: &JobId, photo_id: &PhotoId, phase: PhotoPhase) {
        let now = self.clock.epoch_ms();
        let result = self
            .update(job_id, |session| {
                session.record_photo(photo_id.clone(), phase, now);
            })
            .await;
        if let Err(e) = result {
            tracing::warn!(job_id = %job_id, error = %e, "audit photo event failed");
        }
    }

    /// Finalize the session: end GPS sample, derived metrics, immutable
    /// thereafter. Returns whether the close was recorded.
    pub async fn close(
        &self,
        job_id: &JobId,
        final_checklist: &[ChecklistItem],
        final_notes: Option<String>,
    ) -> bool {
        let gps = self.locations.sample().await;
        let now = self.clock.epoch_ms();
        let result = self
            .update(job_id, |session| {
                session.close(gps, final_notes, final_checklist, now);
            })
            .await;
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(job_id = %job_id, error = %e, "audit session close failed");
                false
            }
        }
    }

    /// Read a session (for the offline analysis side).
    pub async fn session(&self, job_id: &JobId) -> Result<Option<AuditSession>, StoreError> {
        match self
            .store
            .get(&self.config.audit_sessions, job_id.as_str())
            .await?
        {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    async fn write(&self, session: &AuditSession) -> Result<(), StoreError> {
        let doc = to_document(session)?;
        self.store
            .set(&self.config.audit_sessions, session.job_id.as_str(), doc)
            .await
    }

    async fn update(
        &self,
        job_id: &JobId,
        apply: impl FnOnce(&mut AuditSession) + Send,
    ) -> Result<(), StoreError> {
        let Some(mut session) = self.session(job_id).await? else {
            return Err(StoreError::Transient(format!(
                "no audit session for {job_id}"
            )));
        };
        apply(&mut session);
        self.write(&session).await
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
