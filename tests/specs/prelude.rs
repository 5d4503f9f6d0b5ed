// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the integration specs.

pub use dispatch_core::{
    ChecklistItem, Clock, FakeClock, Job, JobAction, JobConfig, JobId, JobStatus, PhotoPhase,
    Priority, StaffId,
};
pub use dispatch_engine::{
    CompletionPayload, FakeLocationSource, FakePhotoUploader, Lifecycle, LifecycleError,
    PhotoCapture, StaffContext,
};
pub use dispatch_store::{CollectionConfig, DocumentStore, MemoryStore};
pub use std::time::Duration;

pub type TestEngine = Lifecycle<MemoryStore, FakePhotoUploader, FakeLocationSource, FakeClock>;

/// A store, a clock, and an engine wired to them.
pub struct World {
    pub store: MemoryStore,
    pub clock: FakeClock,
    pub uploader: FakePhotoUploader,
    pub engine: TestEngine,
}

impl World {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let clock = FakeClock::new();
        let uploader = FakePhotoUploader::new();
        let engine = Lifecycle::new(
            store.clone(),
            CollectionConfig::default(),
            uploader.clone(),
            FakeLocationSource::new(),
            clock.clone(),
        );
        Self { store, clock, uploader, engine }
    }

    /// Create an assigned job and walk it to in_progress, a minute per
    /// step so every record gets a distinct timestamp.
    pub async fn in_progress_job(&self, staff: &StaffContext) -> Job {
        let config = JobConfig::builder("Pool cleaning", "Villa Sunrise")
            .assigned_to(staff.staff_id.clone())
            .build();
        let job = self.engine.create(config).await.unwrap().job;
        self.clock.advance(Duration::from_secs(60));
        self.engine.accept(&job.id, staff).await.unwrap();
        self.clock.advance(Duration::from_secs(60));
        self.engine.start(&job.id, staff).await.unwrap().job
    }
}

pub fn staff(id: &str) -> StaffContext {
    StaffContext::new(id)
}
