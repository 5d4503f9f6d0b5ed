// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle orchestrator: guarded transitions plus their side effects.
//!
//! Every transition re-validates against the freshly read job, commits
//! behind a status precondition, and only then runs side effects
//! (notification, audit session). A conflicting concurrent write gets one
//! re-read; if the transition is no longer legal the caller sees the
//! specific guard error, not a raw conflict.

use crate::archiver::Archiver;
use crate::audit::AuditLog;
use crate::error::LifecycleError;
use crate::gps::LocationSource;
use crate::notify::Notifier;
use crate::photos::{upload_all, PhotoCapture, PhotoUploader};
use dispatch_core::{
    ArchivedJob, ChecklistItem, Clock, Job, JobAction, JobConfig, JobEvent, JobId, Notification,
    StaffId,
};
use dispatch_store::{
    to_document, CollectionConfig, DocumentStore, JobStore, Precondition, StoreError, WriteBatch,
};

/// The acting staff member, as authenticated by the caller.
#[derive(Debug, Clone)]
pub struct StaffContext {
    pub staff_id: StaffId,
}

impl StaffContext {
    pub fn new(staff_id: impl Into<StaffId>) -> Self {
        Self { staff_id: staff_id.into() }
    }
}

/// Result of creating a job.
#[derive(Debug, Clone)]
pub struct CreationOutcome {
    pub job: Job,
    /// Present when the job was created pre-assigned.
    pub notification: Option<Notification>,
}

/// Result of a non-completing transition.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub job: Job,
    pub notification: Option<Notification>,
    /// Whether `start` opened an audit session.
    pub audit_opened: bool,
}

/// Everything the staff member submits at completion time.
#[derive(Debug, Clone, Default)]
pub struct CompletionPayload {
    pub checklist: Vec<ChecklistItem>,
    pub notes: Option<String>,
    pub photos: Vec<PhotoCapture>,
}

/// Result of completing a job.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub archived: ArchivedJob,
    pub notification: Option<Notification>,
    pub photos_uploaded: usize,
    pub photos_failed: usize,
    pub audit_closed: bool,
}

/// The job lifecycle engine.
#[derive(Clone)]
pub struct Lifecycle<S, P, L, C> {
    store: S,
    jobs: JobStore<S>,
    notifier: Notifier<S>,
    archiver: Archiver<S>,
    audit: AuditLog<S, L, C>,
    uploader: P,
    clock: C,
}

impl<S, P, L, C> Lifecycle<S, P, L, C>
where
    S: DocumentStore,
    P: PhotoUploader,
    L: LocationSource,
    C: Clock,
{
    pub fn new(store: S, config: CollectionConfig, uploader: P, locations: L, clock: C) -> Self {
        Self {
            jobs: JobStore::new(store.clone(), config.clone()),
            notifier: Notifier::new(store.clone(), config.clone()),
            archiver: Archiver::new(store.clone(), config.clone()),
            audit: AuditLog::new(store.clone(), config, locations, clock.clone()),
            store,
            uploader,
            clock,
        }
    }

    pub fn jobs(&self) -> &JobStore<S> {
        &self.jobs
    }

    pub fn notifier(&self) -> &Notifier<S> {
        &self.notifier
    }

    pub fn audit(&self) -> &AuditLog<S, L, C> {
        &self.audit
    }

    /// Create a job. Pre-assigned jobs notify the assignee.
    pub async fn create(&self, config: JobConfig) -> Result<CreationOutcome, LifecycleError> {
        let job = Job::new(config, &self.clock);
        self.jobs.insert(&job).await?;
        tracing::info!(job_id = %job.id, status = %job.status, "job created");
        let notification = self.emit_quietly(&job, JobEvent::Assigned).await;
        Ok(CreationOutcome { job, notification })
    }

    /// Accept the job offer. Accepting an unassigned job claims it, and
    /// the claim is guarded so two staff members cannot both win.
    pub async fn accept(
        &self,
        id: &JobId,
        actor: &StaffContext,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let staff = actor.staff_id.clone();
        let job = self
            .transition(id, JobAction::Accept, Some(&actor.staff_id), move |job, now| {
                job.apply_accept(&staff, now);
            })
            .await?;
        let notification = self.emit_quietly(&job, JobEvent::Accepted).await;
        Ok(TransitionOutcome { job, notification, audit_opened: false })
    }

    /// Decline the job offer (terminal).
    pub async fn reject(
        &self,
        id: &JobId,
        actor: &StaffContext,
        reason: impl Into<String>,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let reason = reason.into();
        let job = self
            .transition(id, JobAction::Reject, Some(&actor.staff_id), move |job, _| {
                job.apply_reject(reason.clone());
            })
            .await?;
        let notification = self.emit_quietly(&job, JobEvent::Rejected).await;
        Ok(TransitionOutcome { job, notification, audit_opened: false })
    }

    /// Begin work. Opens the audit session as a side effect; a failed
    /// session open never blocks the start.
    pub async fn start(
        &self,
        id: &JobId,
        actor: &StaffContext,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let job = self
            .transition(id, JobAction::Start, Some(&actor.staff_id), |job, now| {
                job.apply_start(now);
            })
            .await?;
        let audit_opened = self.audit.open(&job, &actor.staff_id).await;
        let notification = self.emit_quietly(&job, JobEvent::Started).await;
        Ok(TransitionOutcome { job, notification, audit_opened })
    }

    /// Call the job off. Unguarded by ownership so admins and dispatchers
    /// can cancel on staff's behalf; the actor is recorded in the log.
    pub async fn cancel(
        &self,
        id: &JobId,
        actor: &StaffContext,
        reason: impl Into<String>,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let reason = reason.into();
        let job = self
            .transition(id, JobAction::Cancel, None, move |job, _| {
                job.apply_cancel(reason.clone());
            })
            .await?;
        tracing::info!(job_id = %id, actor = %actor.staff_id, "job cancelled");
        let notification = self.emit_quietly(&job, JobEvent::Cancelled).await;
        Ok(TransitionOutcome { job, notification, audit_opened: false })
    }

    /// Finish the job: upload photos best-effort, archive atomically,
    /// close the audit session, notify.
    pub async fn complete(
        &self,
        id: &JobId,
        actor: &StaffContext,
        payload: CompletionPayload,
    ) -> Result<CompletionOutcome, LifecycleError> {
        let (mut job, collection) = self
            .jobs
            .locate(id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(id.clone()))?;
        Self::guard(&job, JobAction::Complete, Some(&actor.staff_id))?;

        let (uploaded, photos_failed) = upload_all(&self.uploader, &payload.photos).await;
        let photos_uploaded = uploaded.len();
        job.checklist = payload.checklist.clone();
        job.photos = uploaded;

        let now = self.clock.epoch_ms();
        let archived = match self
            .archiver
            .archive(job, &collection, actor.staff_id.clone(), payload.notes.clone(), now)
            .await
        {
            Ok(archived) => archived,
            Err(StoreError::Conflict { .. }) => {
                // Lost the race; report the job's actual state.
                return match self.jobs.find(id).await? {
                    Some(job) => Err(LifecycleError::InvalidTransition {
                        action: JobAction::Complete,
                        status: job.status,
                    }),
                    None => Err(LifecycleError::NotFound(id.clone())),
                };
            }
            Err(e) => return Err(e.into()),
        };

        let audit_closed = self.audit.close(id, &payload.checklist, payload.notes).await;
        let notification = self.emit_quietly(&archived.job, JobEvent::Completed).await;
        Ok(CompletionOutcome {
            archived,
            notification,
            photos_uploaded,
            photos_failed,
            audit_closed,
        })
    }

    /// Read, guard, mutate, and commit behind a status precondition. A
    /// conflict gets exactly one re-read and retry; a second conflict is
    /// reported from a fresh read as a guard error, never as a raw
    /// conflict.
    async fn transition(
        &self,
        id: &JobId,
        action: JobAction,
        actor: Option<&StaffId>,
        mutate: impl Fn(&mut Job, u64) + Send + Sync,
    ) -> Result<Job, LifecycleError> {
        let mut retried = false;
        loop {
            let (before, collection) = self
                .jobs
                .locate(id)
                .await?
                .ok_or_else(|| LifecycleError::NotFound(id.clone()))?;
            Self::guard(&before, action, actor)?;

            let claiming = actor.is_some() && before.assigned_staff_id.is_none();
            let mut after = before.clone();
            mutate(&mut after, self.clock.epoch_ms());

            let mut batch = WriteBatch::new()
                .set(collection.clone(), id.as_str(), to_document(&after)?)
                .require(Precondition::FieldEquals {
                    collection: collection.clone(),
                    id: id.as_str().to_string(),
                    field: "status".to_string(),
                    value: serde_json::to_value(before.status).map_err(StoreError::from)?,
                });
            if claiming {
                batch = batch.require(Precondition::FieldAbsent {
                    collection,
                    id: id.as_str().to_string(),
                    field: "assigned_staff_id".to_string(),
                });
            }

            match self.store.commit(batch).await {
                Ok(()) => {
                    tracing::info!(job_id = %id, action = %action, status = %after.status, "transition applied");
                    return Ok(after);
                }
                Err(StoreError::Conflict { .. }) => {
                    if retried {
                        // Conflicted twice; report the job's actual state.
                        return match self.jobs.find(id).await? {
                            Some(job) => Err(LifecycleError::InvalidTransition {
                                action,
                                status: job.status,
                            }),
                            None => Err(LifecycleError::NotFound(id.clone())),
                        };
                    }
                    tracing::debug!(job_id = %id, action = %action, "transition conflicted, re-reading");
                    retried = true;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn guard(job: &Job, action: JobAction, actor: Option<&StaffId>) -> Result<(), LifecycleError> {
        if !job.status.allows(action) {
            return Err(LifecycleError::InvalidTransition { action, status: job.status });
        }
        if let (Some(actor), Some(owner)) = (actor, job.assigned_staff_id.as_ref()) {
            if actor != owner {
                return Err(LifecycleError::Forbidden { job_id: job.id.clone() });
            }
        }
        Ok(())
    }

    /// Notifications never block a transition that already committed.
    async fn emit_quietly(&self, job: &Job, event: JobEvent) -> Option<Notification> {
        match self.notifier.emit(job, event, self.clock.epoch_ms()).await {
            Ok(notification) => notification,
            Err(e) => {
                tracing::warn!(job_id = %job.id, event = %event, error = %e, "notification emit failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
