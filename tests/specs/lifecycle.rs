// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full lifecycle specs.
//!
//! Drive a job end to end through the engine and verify each phase
//! stamp, guard, and side effect along the way.

use crate::prelude::*;

#[tokio::test]
async fn assigned_job_runs_the_whole_lifecycle() {
    let world = World::new();
    let ana = staff("stf-ana");
    let created_at = world.clock.epoch_ms();

    let created = world
        .engine
        .create(
            JobConfig::builder("Pool cleaning", "Villa Sunrise")
                .assigned_to("stf-ana")
                .priority(Priority::High)
                .checklist(vec![
                    ChecklistItem::required("Skim surface"),
                    ChecklistItem::required("Check chlorine"),
                ])
                .build(),
        )
        .await
        .unwrap();
    let id = created.job.id.clone();
    assert_eq!(created.job.status, JobStatus::Assigned);
    assert_eq!(created.job.assigned_at_ms, Some(created_at));

    world.clock.advance(Duration::from_secs(5 * 60));
    let accepted = world.engine.accept(&id, &ana).await.unwrap();
    assert_eq!(accepted.job.status, JobStatus::Accepted);
    assert_eq!(accepted.job.accepted_at_ms, Some(world.clock.epoch_ms()));

    world.clock.advance(Duration::from_secs(30 * 60));
    let started = world.engine.start(&id, &ana).await.unwrap();
    assert_eq!(started.job.status, JobStatus::InProgress);
    assert_eq!(started.job.started_at_ms, Some(world.clock.epoch_ms()));
    assert!(started.audit_opened);

    world.clock.advance(Duration::from_secs(55 * 60));
    let completed = world
        .engine
        .complete(
            &id,
            &ana,
            CompletionPayload {
                checklist: vec![
                    ChecklistItem::required("Skim surface").done(),
                    ChecklistItem::required("Check chlorine").done(),
                ],
                notes: Some("all clear".into()),
                photos: vec![PhotoCapture::new("after.jpg", PhotoPhase::After)],
            },
        )
        .await
        .unwrap();

    let archived = completed.archived;
    assert_eq!(archived.job.status, JobStatus::Completed);
    assert_eq!(archived.actual_minutes, 55);
    assert_eq!(archived.completed_by, "stf-ana");
    // Earlier phase stamps survive the move
    assert_eq!(archived.job.created_at_ms, created_at);
    assert_eq!(archived.job.accepted_at_ms, accepted.job.accepted_at_ms);
    assert_eq!(archived.job.started_at_ms, started.job.started_at_ms);

    // One notification per transition, all addressed to the assignee
    let notifications = world
        .engine
        .notifier()
        .for_staff(&StaffId::from("stf-ana"))
        .await
        .unwrap();
    assert_eq!(notifications.len(), 4);
    assert!(notifications.iter().all(|n| n.staff_id == "stf-ana"));
    assert!(notifications.iter().all(|n| n.job_id == id));

    // The audit trail closed with the final numbers
    let session = world.engine.audit().session(&id).await.unwrap().unwrap();
    assert!(session.is_closed());
    assert_eq!(session.completion_rate, Some(1.0));
    assert_eq!(session.total_minutes, Some(55));
}

#[tokio::test]
async fn stale_accept_loses_cleanly() {
    let world = World::new();
    let created = world
        .engine
        .create(JobConfig::builder("Garden weeding", "Villa Mango").build())
        .await
        .unwrap();
    let id = created.job.id.clone();

    // Ana claims the pending job first
    world.engine.accept(&id, &staff("stf-ana")).await.unwrap();

    // Bob's accept was computed against the stale pending snapshot
    let err = world.engine.accept(&id, &staff("stf-bob")).await.unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidTransition {
            action: JobAction::Accept,
            status: JobStatus::Accepted
        }
    ));

    // Ana's claim is untouched
    let job = world.engine.jobs().find(&id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Accepted);
    assert_eq!(job.assigned_staff_id, Some(StaffId::from("stf-ana")));
}

#[tokio::test]
async fn transient_write_failures_do_not_corrupt_state() {
    let world = World::new();
    let ana = staff("stf-ana");
    let job = world.in_progress_job(&ana).await;

    world.store.fail_next_commits(1);
    let err = world
        .engine
        .complete(&job.id, &ana, CompletionPayload::default())
        .await
        .unwrap_err();
    assert!(err.is_transient());

    // Still active, still in progress, nothing archived
    let fresh = world.engine.jobs().find(&job.id).await.unwrap().unwrap();
    assert_eq!(fresh.status, JobStatus::InProgress);
    assert!(world.engine.jobs().archived(&job.id).await.unwrap().is_none());

    // The straight retry completes
    let outcome = world
        .engine
        .complete(&job.id, &ana, CompletionPayload::default())
        .await
        .unwrap();
    assert_eq!(outcome.archived.job.status, JobStatus::Completed);
}

#[tokio::test]
async fn staff_queue_merges_both_active_collections() {
    let world = World::new();
    let ana = staff("stf-ana");

    let urgent = world
        .engine
        .create(
            JobConfig::builder("Burst pipe", "Villa Sunrise")
                .assigned_to("stf-ana")
                .priority(Priority::Urgent)
                .build(),
        )
        .await
        .unwrap()
        .job;
    // Legacy job written by the old client into the secondary collection
    let legacy = Job::builder()
        .id("job-legacy-1")
        .assigned_to("stf-ana")
        .priority(Priority::Low)
        .build(&world.clock);
    world
        .store
        .set(
            "staff_jobs",
            legacy.id.as_str(),
            dispatch_store::to_document(&legacy).unwrap(),
        )
        .await
        .unwrap();

    let queue = world.engine.jobs().for_staff(&ana.staff_id).await.unwrap();
    let ids: Vec<_> = queue.iter().map(|j| j.id.clone()).collect();
    assert_eq!(ids, vec![urgent.id, legacy.id]);
}
