//! Dispatcher, status-change, and sweep behavior against the in-memory
//! backend.

mod common;

use std::time::Duration;

use common::{add_donor, add_request, context};
use lifelink_core::error::ErrorKind;
use lifelink_database::repositories::{DonorStore, MatchStore, NotificationStore, RequestStore};
use lifelink_delivery::SendBehavior;
use lifelink_entity::donor::BloodType;
use lifelink_entity::donor_match::{MatchStatus, NewMatch};
use lifelink_entity::notification::{DeliveryStatus, NotificationKind};
use lifelink_entity::request::RequestStatus;

async fn seed_pending_match(
    ctx: &common::TestContext,
    donor_id: uuid::Uuid,
    request_id: uuid::Uuid,
) -> lifelink_entity::donor_match::DonorMatch {
    let created = MatchStore::insert_batch(
        &*ctx.store,
        &[NewMatch {
            request_id,
            donor_id,
            notified_at: chrono::Utc::now(),
        }],
    )
    .await
    .unwrap();
    created.into_iter().next().unwrap()
}

#[tokio::test]
async fn test_notify_match_records_sent_and_advances_match() {
    let ctx = context();
    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    let notification = ctx.dispatcher.notify_match(m.id).await.unwrap();

    assert_eq!(notification.status, DeliveryStatus::Sent);
    assert_eq!(notification.kind, NotificationKind::Matched);
    assert_eq!(notification.recipient, donor.phone);

    let refreshed = MatchStore::find_by_id(&*ctx.store, m.id).await.unwrap().unwrap();
    assert_eq!(refreshed.status, MatchStatus::Notified);
    assert!(refreshed.notified_at > m.notified_at);
}

#[tokio::test]
async fn test_notify_twice_is_monotonic() {
    let ctx = context();
    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    ctx.dispatcher.notify_match(m.id).await.unwrap();
    ctx.dispatcher.notify_match(m.id).await.unwrap();

    // two rows in the log, but the match never moves backward
    let notifications = NotificationStore::find_all(&*ctx.store).await.unwrap();
    assert_eq!(notifications.len(), 2);

    let refreshed = MatchStore::find_by_id(&*ctx.store, m.id).await.unwrap().unwrap();
    assert_eq!(refreshed.status, MatchStatus::Notified);
}

#[tokio::test]
async fn test_failed_send_leaves_match_pending_for_retry() {
    let ctx = context();
    ctx.sender.set_behavior(SendBehavior::Reject("no credit".into()));

    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    let notification = ctx.dispatcher.notify_match(m.id).await.unwrap();
    assert_eq!(notification.status, DeliveryStatus::Failed);

    let refreshed = MatchStore::find_by_id(&*ctx.store, m.id).await.unwrap().unwrap();
    assert_eq!(refreshed.status, MatchStatus::Pending);

    // a later retry succeeds and only then advances the match
    ctx.sender.set_behavior(SendBehavior::Accept);
    ctx.dispatcher.notify_match(m.id).await.unwrap();
    let refreshed = MatchStore::find_by_id(&*ctx.store, m.id).await.unwrap().unwrap();
    assert_eq!(refreshed.status, MatchStatus::Notified);
}

#[tokio::test]
async fn test_transport_error_is_recorded_as_failed() {
    let ctx = context();
    ctx.sender.set_behavior(SendBehavior::TransportError);

    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    let notification = ctx.dispatcher.notify_match(m.id).await.unwrap();
    assert_eq!(notification.status, DeliveryStatus::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_send_is_classified_failed() {
    let ctx = context();
    // default send timeout is 10s; the sender hangs for an hour
    ctx.sender
        .set_behavior(SendBehavior::Delay(Duration::from_secs(3600)));

    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    let notification = ctx.dispatcher.notify_match(m.id).await.unwrap();
    assert_eq!(notification.status, DeliveryStatus::Failed);

    let refreshed = MatchStore::find_by_id(&*ctx.store, m.id).await.unwrap().unwrap();
    assert_eq!(refreshed.status, MatchStatus::Pending);
}

#[tokio::test]
async fn test_batch_skips_missing_donor_and_delivers_the_rest() {
    let ctx = context();
    let kept = add_donor(&ctx.store, "kept", BloodType::ONeg, None, true).await;
    let doomed = add_donor(&ctx.store, "doomed", BloodType::OPos, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;

    seed_pending_match(&ctx, kept.id, request.id).await;
    seed_pending_match(&ctx, doomed.id, request.id).await;
    DonorStore::delete(&*ctx.store, doomed.id).await.unwrap();

    let summary = ctx.dispatcher.notify_batch(request.id).await.unwrap();

    assert_eq!(summary.sent, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(ctx.sender.sent_count(), 1);
}

#[tokio::test]
async fn test_batch_only_touches_pending_matches() {
    let ctx = context();
    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    // first run notifies, second run has nothing pending
    let first = ctx.dispatcher.notify_batch(request.id).await.unwrap();
    assert_eq!(first.sent, 1);

    let second = ctx.dispatcher.notify_batch(request.id).await.unwrap();
    assert_eq!(second.sent + second.failed + second.skipped, 0);

    let refreshed = MatchStore::find_by_id(&*ctx.store, m.id).await.unwrap().unwrap();
    assert_eq!(refreshed.status, MatchStatus::Notified);
}

#[tokio::test]
async fn test_accepting_match_flips_request_and_notifies_once() {
    let ctx = context();
    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    ctx.dispatcher.notify_match(m.id).await.unwrap();
    let updated = ctx
        .dispatcher
        .handle_status_change(m.id, MatchStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(updated.status, MatchStatus::Accepted);

    let refreshed_request = RequestStore::find_by_id(&*ctx.store, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed_request.status, RequestStatus::Matched);

    let accepted: Vec<_> = NotificationStore::find_all(&*ctx.store)
        .await
        .unwrap()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::Accepted)
        .collect();
    assert_eq!(accepted.len(), 1);
}

#[tokio::test]
async fn test_idempotent_status_rewrite_fires_no_side_effects() {
    let ctx = context();
    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    ctx.dispatcher.notify_match(m.id).await.unwrap();
    ctx.dispatcher
        .handle_status_change(m.id, MatchStatus::Accepted)
        .await
        .unwrap();
    let before = NotificationStore::find_all(&*ctx.store).await.unwrap().len();

    // rewriting the same status is a no-op
    ctx.dispatcher
        .handle_status_change(m.id, MatchStatus::Accepted)
        .await
        .unwrap();
    let after = NotificationStore::find_all(&*ctx.store).await.unwrap().len();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_illegal_transition_is_a_conflict() {
    let ctx = context();
    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let m = seed_pending_match(&ctx, donor.id, request.id).await;

    // Pending → Completed skips the whole lifecycle
    let err = ctx
        .dispatcher
        .handle_status_change(m.id, MatchStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let refreshed = MatchStore::find_by_id(&*ctx.store, m.id).await.unwrap().unwrap();
    assert_eq!(refreshed.status, MatchStatus::Pending);
}

#[tokio::test]
async fn test_sweep_notifies_only_matchless_pending_requests() {
    let ctx = context();
    let donor = add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let with_match = add_request(&ctx.store, BloodType::APos, None).await;
    let without_match = add_request(&ctx.store, BloodType::BNeg, None).await;
    seed_pending_match(&ctx, donor.id, with_match.id).await;

    let report = ctx.sweep.sweep_unmatched().await.unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(report.notified, 1);
    assert_eq!(report.failed, 0);

    let notifications = NotificationStore::find_all(&*ctx.store).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::NoMatch);
    assert_eq!(notifications[0].request_id, Some(without_match.id));
    assert_eq!(notifications[0].donor_id, None);
    assert_eq!(notifications[0].recipient, without_match.contact_number);
}

#[tokio::test]
async fn test_sweep_is_safe_to_repeat() {
    let ctx = context();
    add_request(&ctx.store, BloodType::BNeg, None).await;

    let first = ctx.sweep.sweep_unmatched().await.unwrap();
    let second = ctx.sweep.sweep_unmatched().await.unwrap();

    assert_eq!(first.scanned, 1);
    assert_eq!(second.scanned, 1);
}

#[tokio::test]
async fn test_end_to_end_match_accept_flow() {
    let ctx = context();
    // donor X can give to anyone and has never donated; donor Y matches
    // the type exactly but is unavailable
    let donor_x = add_donor(&ctx.store, "X", BloodType::ONeg, None, true).await;
    add_donor(&ctx.store, "Y", BloodType::APos, None, false).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;

    let results = ctx.engine.auto_match(request.id).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].donor.id, donor_x.id);

    let match_id = results[0].donor_match.id;
    let m = MatchStore::find_by_id(&*ctx.store, match_id).await.unwrap().unwrap();
    assert_eq!(m.status, MatchStatus::Notified);

    ctx.dispatcher
        .handle_status_change(match_id, MatchStatus::Accepted)
        .await
        .unwrap();

    let refreshed_request = RequestStore::find_by_id(&*ctx.store, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed_request.status, RequestStatus::Matched);

    let notifications = NotificationStore::find_all(&*ctx.store).await.unwrap();
    assert_eq!(notifications.len(), 2);
    let accepted = notifications
        .iter()
        .filter(|n| n.kind == NotificationKind::Accepted)
        .count();
    assert_eq!(accepted, 1);
}
