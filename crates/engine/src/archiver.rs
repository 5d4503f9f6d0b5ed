// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic completion archiver.
//!
//! Completion moves a job out of its active collection and into the
//! archive in one commit. Either both the archive write and the active
//! delete land, or neither does; a job is never in both places and never
//! in neither.

use dispatch_core::{ArchivedJob, Job, JobStatus, StaffId};
use dispatch_store::{
    from_document, to_document, CollectionConfig, DocumentStore, Precondition, StoreError,
    WriteBatch,
};
use serde_json::json;

/// Moves finished jobs into the archive collection.
#[derive(Clone)]
pub struct Archiver<S> {
    store: S,
    config: CollectionConfig,
}

impl<S: DocumentStore> Archiver<S> {
    pub fn new(store: S, config: CollectionConfig) -> Self {
        Self { store, config }
    }

    /// Archive an in-progress job in one atomic commit.
    ///
    /// `job` is the active snapshot with the final checklist and uploaded
    /// photos already applied; `source` is the active collection it was
    /// read from. The commit is guarded on the active copy still being
    /// `in_progress`, so a concurrent cancel or a duplicate completion
    /// cannot double-archive.
    ///
    /// Safe to retry: when the guard fails because the job was already
    /// archived, the existing archived record is returned unchanged.
    pub async fn archive(
        &self,
        mut job: Job,
        source: &str,
        completed_by: StaffId,
        completion_notes: Option<String>,
        now_ms: u64,
    ) -> Result<ArchivedJob, StoreError> {
        let actual_minutes =
            (now_ms.saturating_sub(job.started_at_ms.unwrap_or(now_ms)) / 60_000) as u32;
        job.status = JobStatus::Completed;
        let archived = ArchivedJob {
            job,
            completed_at_ms: now_ms,
            completed_by,
            actual_minutes,
            completion_notes,
        };

        let id = archived.job.id.as_str().to_string();
        let doc = to_document(&archived)?;
        let batch = WriteBatch::new()
            .set(self.config.archive.clone(), id.clone(), doc)
            .delete(source, id.clone())
            .require(Precondition::FieldEquals {
                collection: source.to_string(),
                id: id.clone(),
                field: "status".to_string(),
                value: json!("in_progress"),
            });

        match self.store.commit(batch).await {
            Ok(()) => {
                tracing::info!(job_id = %archived.job.id, actual_minutes, "job archived");
                Ok(archived)
            }
            Err(StoreError::Conflict { .. }) => {
                // A previous attempt may have landed before its ack was
                // lost. The archived copy, if present, is authoritative.
                match self.store.get(&self.config.archive, &id).await? {
                    Some(doc) => Ok(from_document(doc)?),
                    None => Err(StoreError::Conflict {
                        collection: source.to_string(),
                        id,
                        detail: "active job is no longer in progress".to_string(),
                    }),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Typed read of one archived job.
    pub async fn archived(&self, id: &str) -> Result<Option<ArchivedJob>, StoreError> {
        match self.store.get(&self.config.archive, id).await? {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "archiver_tests.rs"]
mod tests;
