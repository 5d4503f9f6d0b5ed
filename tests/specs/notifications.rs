// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification delivery specs.

use crate::prelude::*;
use dispatch_core::{JobEvent, NOTIFICATION_TTL_MS};
use serde_json::json;

#[tokio::test]
async fn every_transition_notifies_the_same_identity() {
    let world = World::new();
    let ana = staff("stf-ana");
    let job = world.in_progress_job(&ana).await;
    world.clock.advance(Duration::from_secs(60));
    world
        .engine
        .complete(&job.id, &ana, CompletionPayload::default())
        .await
        .unwrap();

    let notifications = world
        .engine
        .notifier()
        .for_staff(&ana.staff_id)
        .await
        .unwrap();
    let events: Vec<_> = notifications.iter().map(|n| n.event).collect();
    assert_eq!(
        events,
        vec![
            JobEvent::Completed,
            JobEvent::Started,
            JobEvent::Accepted,
            JobEvent::Assigned,
        ]
    );
    // Identity on the notification always matches the job's assignee
    assert!(notifications.iter().all(|n| n.staff_id == ana.staff_id));
}

#[tokio::test]
async fn legacy_records_stay_reachable() {
    let world = World::new();
    let legacy = match json!({
        "id": "ntf-legacy-1",
        "assigned_to": "stf-ana",
        "job_id": "job-old",
        "event": "assigned",
        "title": "New job: Garden weeding",
        "summary": {"property": "Villa Mango", "priority": "low"},
        "created_at_ms": 500u64,
        "expires_at_ms": 500u64 + NOTIFICATION_TTL_MS,
        "read": false,
    }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    world.store.set("notifications", "ntf-legacy-1", legacy).await.unwrap();

    let found = world
        .engine
        .notifier()
        .for_staff(&StaffId::from("stf-ana"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].staff_id, "stf-ana");

    // Once a durably-keyed notification exists, only it is served
    let job = world
        .engine
        .create(JobConfig::builder("Pool cleaning", "Villa Sunrise").assigned_to("stf-ana").build())
        .await
        .unwrap()
        .job;
    let found = world
        .engine
        .notifier()
        .for_staff(&StaffId::from("stf-ana"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].job_id, job.id);
}

#[tokio::test]
async fn expired_notifications_are_hidden_not_deleted() {
    let world = World::new();
    let ana = staff("stf-ana");
    world
        .engine
        .create(JobConfig::builder("Pool cleaning", "Villa Sunrise").assigned_to("stf-ana").build())
        .await
        .unwrap();

    world.clock.advance(Duration::from_millis(NOTIFICATION_TTL_MS));
    let visible = world
        .engine
        .notifier()
        .unexpired_for_staff(&ana.staff_id, world.clock.epoch_ms())
        .await
        .unwrap();
    assert!(visible.is_empty());

    // The record itself survives for history views
    assert_eq!(world.store.len("notifications"), 1);
}

#[tokio::test]
async fn reading_and_clearing_notifications() {
    let world = World::new();
    let ana = staff("stf-ana");
    world.in_progress_job(&ana).await;

    let all = world.engine.notifier().for_staff(&ana.staff_id).await.unwrap();
    assert_eq!(all.len(), 3);
    world.engine.notifier().mark_read(&all[0].id).await.unwrap();
    let all = world.engine.notifier().for_staff(&ana.staff_id).await.unwrap();
    assert!(all[0].read);
    assert!(!all[1].read);

    let removed = world
        .engine
        .notifier()
        .clear_for_staff(&ana.staff_id)
        .await
        .unwrap();
    assert_eq!(removed, 3);
    assert!(world.store.is_empty("notifications"));
}
