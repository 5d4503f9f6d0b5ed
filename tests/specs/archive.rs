// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion and archive specs.

use crate::prelude::*;

#[tokio::test]
async fn completion_with_partial_photo_failure_still_archives() {
    let world = World::new();
    let ana = staff("stf-ana");
    let job = world.in_progress_job(&ana).await;
    world.uploader.fail_source("during.jpg");

    let outcome = world
        .engine
        .complete(
            &job.id,
            &ana,
            CompletionPayload {
                checklist: Vec::new(),
                notes: None,
                photos: vec![
                    PhotoCapture::new("before.jpg", PhotoPhase::Before),
                    PhotoCapture::new("during.jpg", PhotoPhase::During),
                    PhotoCapture::new("after.jpg", PhotoPhase::After),
                ],
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.photos_uploaded, 2);
    assert_eq!(outcome.photos_failed, 1);
    // The archive holds exactly the photos that made it
    let phases: Vec<_> = outcome.archived.job.photos.iter().map(|p| p.phase).collect();
    assert_eq!(phases, vec![PhotoPhase::Before, PhotoPhase::After]);
}

#[tokio::test]
async fn a_job_is_never_in_both_places() {
    let world = World::new();
    let ana = staff("stf-ana");
    let job = world.in_progress_job(&ana).await;

    world
        .engine
        .complete(&job.id, &ana, CompletionPayload::default())
        .await
        .unwrap();

    assert!(world.store.get("jobs", job.id.as_str()).await.unwrap().is_none());
    assert!(world.store.get("staff_jobs", job.id.as_str()).await.unwrap().is_none());
    assert!(world
        .store
        .get("completed_jobs", job.id.as_str())
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn archived_document_round_trips_without_null_placeholders() {
    let world = World::new();
    let ana = staff("stf-ana");
    let job = world.in_progress_job(&ana).await;

    world.clock.advance(Duration::from_secs(20 * 60));
    let outcome = world
        .engine
        .complete(
            &job.id,
            &ana,
            CompletionPayload {
                checklist: vec![ChecklistItem::required("Skim surface").done()],
                notes: None,
                photos: Vec::new(),
            },
        )
        .await
        .unwrap();

    let doc = world
        .store
        .get("completed_jobs", job.id.as_str())
        .await
        .unwrap()
        .unwrap();
    assert!(!doc.contains_key("completion_notes"));
    assert!(!doc.contains_key("cancellation_reason"));
    assert!(!doc.values().any(|v| v.is_null()));

    let archived = world.engine.jobs().archived(&job.id).await.unwrap().unwrap();
    assert_eq!(archived, outcome.archived);
    assert_eq!(archived.actual_minutes, 20);
}

#[tokio::test]
async fn duplicate_completion_leaves_the_archive_unchanged() {
    let world = World::new();
    let ana = staff("stf-ana");
    let job = world.in_progress_job(&ana).await;

    let first = world
        .engine
        .complete(&job.id, &ana, CompletionPayload::default())
        .await
        .unwrap();

    // A second submission of the same completion reports the job's state
    let err = world
        .engine
        .complete(&job.id, &ana, CompletionPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::NotFound(_)));

    // And the archive is unchanged
    let archived = world.engine.jobs().archived(&job.id).await.unwrap().unwrap();
    assert_eq!(archived, first.archived);
}

#[tokio::test]
async fn cancellation_beats_completion() {
    let world = World::new();
    let ana = staff("stf-ana");
    let job = world.in_progress_job(&ana).await;

    // Dispatcher cancels while the staff member is still on site
    world
        .engine
        .cancel(&job.id, &staff("stf-dispatcher"), "owner arrived")
        .await
        .unwrap();

    let err = world
        .engine
        .complete(&job.id, &ana, CompletionPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidTransition {
            action: JobAction::Complete,
            status: JobStatus::Cancelled
        }
    ));
    assert!(world.engine.jobs().archived(&job.id).await.unwrap().is_none());
}
