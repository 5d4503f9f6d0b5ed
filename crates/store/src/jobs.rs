// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job store read policies.
//!
//! Jobs originate from two historically distinct active collections.
//! Every lookup-by-id and every staff-scoped query checks both and merges
//! the results, de-duplicating by job id. This is load-bearing: omitting
//! either collection silently hides jobs from the affected staff member.

use crate::collections::CollectionConfig;
use crate::document::{from_document, to_document};
use crate::error::StoreError;
use crate::store::DocumentStore;
use dispatch_core::{ArchivedJob, Job, JobId, StaffId};
use serde_json::Value;
use std::collections::HashSet;

/// Typed access to active and archived job documents.
#[derive(Clone)]
pub struct JobStore<S> {
    store: S,
    config: CollectionConfig,
}

impl<S: DocumentStore> JobStore<S> {
    pub fn new(store: S, config: CollectionConfig) -> Self {
        Self { store, config }
    }

    /// Create a new active job document. New jobs always land in the
    /// primary active collection; the secondary exists for legacy data.
    pub async fn insert(&self, job: &Job) -> Result<(), StoreError> {
        let doc = to_document(job)?;
        self.store.set(&self.config.active[0], job.id.as_str(), doc).await
    }

    /// Find a job and the name of the active collection holding it,
    /// checking both sources in configured order.
    pub async fn locate(&self, id: &JobId) -> Result<Option<(Job, String)>, StoreError> {
        for collection in &self.config.active {
            if let Some(doc) = self.store.get(collection, id.as_str()).await? {
                return Ok(Some((from_document(doc)?, collection.clone())));
            }
        }
        Ok(None)
    }

    /// Find a job by id across both active collections.
    pub async fn find(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        Ok(self.locate(id).await?.map(|(job, _)| job))
    }

    /// All active jobs for a staff member, merged across both collections,
    /// de-duplicated by job id, sorted urgent-first then earliest-schedule.
    pub async fn for_staff(&self, staff: &StaffId) -> Result<Vec<Job>, StoreError> {
        let key = Value::String(staff.as_str().to_string());
        let mut seen = HashSet::new();
        let mut jobs: Vec<Job> = Vec::new();
        for collection in &self.config.active {
            for (_, doc) in self
                .store
                .query_eq(collection, "assigned_staff_id", &key)
                .await?
            {
                let job: Job = from_document(doc)?;
                if seen.insert(job.id.clone()) {
                    jobs.push(job);
                } else {
                    tracing::debug!(job_id = %job.id, %collection, "duplicate job across active collections");
                }
            }
        }
        jobs.sort_by_key(Job::queue_key);
        Ok(jobs)
    }

    /// Read a job back from the archive.
    pub async fn archived(&self, id: &JobId) -> Result<Option<ArchivedJob>, StoreError> {
        match self.store.get(&self.config.archive, id.as_str()).await? {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
