// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification emitter and the staff-identity query contract.
//!
//! A notification is addressed with the job's own `assigned_staff_id` —
//! taking the identity from the job record structurally rules out the
//! job/notification identity divergence that makes delivery silently
//! fail.

use dispatch_core::{Job, JobEvent, Notification, NotificationId, StaffId};
use dispatch_store::{
    from_document, to_document, CollectionConfig, DocumentStore, Document, Precondition,
    StoreError, WriteBatch,
};
use serde_json::Value;
use std::collections::BTreeSet;

/// Identity fields found on historical notification documents, tried in
/// order when the primary `staff_id` query yields nothing.
pub const LEGACY_STAFF_FIELDS: [&str; 2] = ["assigned_to", "staff_doc_id"];

/// Writes and reads notification records.
#[derive(Clone)]
pub struct Notifier<S> {
    store: S,
    config: CollectionConfig,
}

impl<S: DocumentStore> Notifier<S> {
    pub fn new(store: S, config: CollectionConfig) -> Self {
        Self { store, config }
    }

    /// Write the notification for an event on a job. Returns `None`
    /// without writing when the job has no assigned staff member.
    pub async fn emit(
        &self,
        job: &Job,
        event: JobEvent,
        now_ms: u64,
    ) -> Result<Option<Notification>, StoreError> {
        let Some(staff_id) = job.assigned_staff_id.clone() else {
            return Ok(None);
        };
        let notification = Notification::for_event(job, staff_id, event, now_ms);
        let doc = to_document(&notification)?;
        self.store
            .set(&self.config.notifications, notification.id.as_str(), doc)
            .await?;
        tracing::info!(
            job_id = %job.id,
            staff_id = %notification.staff_id,
            event = %event,
            "notification emitted"
        );
        Ok(Some(notification))
    }

    /// All notifications for a staff member, newest first.
    ///
    /// Queries the durable identity field first; only when that yields
    /// zero results does it fall through the legacy identity fields, in
    /// order. Historical data is inconsistent about which field it used,
    /// and degrading to the fallback beats showing nothing.
    pub async fn for_staff(&self, staff: &StaffId) -> Result<Vec<Notification>, StoreError> {
        let key = Value::String(staff.as_str().to_string());
        let mut hits = self
            .store
            .query_eq(&self.config.notifications, "staff_id", &key)
            .await?;
        if hits.is_empty() {
            for field in LEGACY_STAFF_FIELDS {
                hits = self
                    .store
                    .query_eq(&self.config.notifications, field, &key)
                    .await?;
                if !hits.is_empty() {
                    break;
                }
            }
        }

        let mut notifications: Vec<Notification> = Vec::with_capacity(hits.len());
        for (id, doc) in hits {
            match decode(doc) {
                Some(n) => notifications.push(n),
                None => tracing::warn!(notification_id = %id, "undecodable notification skipped"),
            }
        }
        notifications.sort_by_key(|n| std::cmp::Reverse(n.created_at_ms));
        Ok(notifications)
    }

    /// Unexpired notifications for a staff member (client-side filter).
    pub async fn unexpired_for_staff(
        &self,
        staff: &StaffId,
        now_ms: u64,
    ) -> Result<Vec<Notification>, StoreError> {
        let mut notifications = self.for_staff(staff).await?;
        notifications.retain(|n| !n.is_expired(now_ms));
        Ok(notifications)
    }

    /// Flip the read flag. No-op when the notification no longer exists.
    pub async fn mark_read(&self, id: &NotificationId) -> Result<(), StoreError> {
        let collection = &self.config.notifications;
        let Some(mut doc) = self.store.get(collection, id.as_str()).await? else {
            return Ok(());
        };
        doc.insert("read".into(), Value::Bool(true));
        let batch = WriteBatch::new()
            .set(collection.clone(), id.as_str(), doc)
            .require(Precondition::Exists {
                collection: collection.clone(),
                id: id.as_str().to_string(),
            });
        match self.store.commit(batch).await {
            // Deleted between read and write: nothing left to mark
            Err(StoreError::Conflict { .. }) => Ok(()),
            other => other,
        }
    }

    /// Bulk delete for an explicit user action. Returns how many records
    /// were removed.
    ///
    /// Unlike the read path, the clear sweeps every identity field: a
    /// primary-keyed hit must not shield legacy-keyed records from an
    /// explicit delete.
    pub async fn clear_for_staff(&self, staff: &StaffId) -> Result<usize, StoreError> {
        let key = Value::String(staff.as_str().to_string());
        let mut ids = BTreeSet::new();
        for field in std::iter::once("staff_id").chain(LEGACY_STAFF_FIELDS) {
            for (id, _) in self
                .store
                .query_eq(&self.config.notifications, field, &key)
                .await?
            {
                ids.insert(id);
            }
        }
        if ids.is_empty() {
            return Ok(0);
        }
        let mut batch = WriteBatch::new();
        for id in &ids {
            batch = batch.delete(self.config.notifications.clone(), id.as_str());
        }
        self.store.commit(batch).await?;
        Ok(ids.len())
    }
}

/// Decode a notification document, migrating a legacy identity field into
/// `staff_id` when the durable field is missing.
fn decode(mut doc: Document) -> Option<Notification> {
    if !doc.contains_key("staff_id") {
        for field in LEGACY_STAFF_FIELDS {
            if let Some(value) = doc.remove(field) {
                doc.insert("staff_id".into(), value);
                break;
            }
        }
    }
    from_document(doc).ok()
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
