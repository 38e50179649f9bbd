//! Match engine behavior against the in-memory backend.

mod common;

use common::{add_donor, add_request, context};
use lifelink_database::repositories::{DonorStore, MatchStore};
use lifelink_entity::donor::{BloodType, UpdateDonor};
use lifelink_entity::donor_match::MatchStatus;

#[tokio::test]
async fn test_auto_match_unknown_request_is_not_found() {
    let ctx = context();
    let err = ctx.engine.auto_match(uuid::Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, lifelink_core::error::ErrorKind::NotFound);
}

#[tokio::test]
async fn test_auto_match_selects_compatible_available_donors_only() {
    let ctx = context();
    let compatible = add_donor(&ctx.store, "o-neg", BloodType::ONeg, None, true).await;
    add_donor(&ctx.store, "a-plus-unavailable", BloodType::APos, None, false).await;
    add_donor(&ctx.store, "b-plus", BloodType::BPos, None, true).await;

    let request = add_request(&ctx.store, BloodType::APos, None).await;
    let results = ctx.engine.auto_match(request.id).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].donor.id, compatible.id);
}

#[tokio::test]
async fn test_auto_match_excludes_donors_in_cooldown() {
    let ctx = context();
    let recent = add_donor(&ctx.store, "recent", BloodType::ONeg, None, true).await;
    DonorStore::update(
        &*ctx.store,
        recent.id,
        &UpdateDonor {
            last_donation_date: Some(chrono::Utc::now() - chrono::Duration::days(30)),
            ..UpdateDonor::default()
        },
    )
    .await
    .unwrap();

    let rested = add_donor(&ctx.store, "rested", BloodType::ONeg, None, true).await;
    DonorStore::update(
        &*ctx.store,
        rested.id,
        &UpdateDonor {
            last_donation_date: Some(chrono::Utc::now() - chrono::Duration::days(120)),
            ..UpdateDonor::default()
        },
    )
    .await
    .unwrap();

    let request = add_request(&ctx.store, BloodType::ONeg, None).await;
    let results = ctx.engine.auto_match(request.id).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].donor.id, rested.id);
}

#[tokio::test]
async fn test_auto_match_is_idempotent_per_pair() {
    let ctx = context();
    add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;

    let first = ctx.engine.auto_match(request.id).await.unwrap();
    assert_eq!(first.len(), 1);

    let second = ctx.engine.auto_match(request.id).await.unwrap();
    assert!(second.is_empty(), "re-running must not create duplicates");

    let all = MatchStore::find_by_request(&*ctx.store, request.id)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_auto_match_orders_near_donors_first_and_keeps_far_ones() {
    let ctx = context();
    // request sits at the origin; one donor on top of it, one ~111 km away
    let far = add_donor(&ctx.store, "far", BloodType::ONeg, Some("1.0,0.0"), true).await;
    let near = add_donor(&ctx.store, "near", BloodType::ONeg, Some("0.0,0.0"), true).await;

    let request = add_request(&ctx.store, BloodType::APos, Some("0.0,0.0")).await;
    let results = ctx.engine.auto_match(request.id).await.unwrap();

    assert_eq!(results.len(), 2, "the far donor must not be dropped");
    assert_eq!(results[0].donor.id, near.id);
    assert_eq!(results[1].donor.id, far.id);
    assert!(results[0].distance_km.unwrap() < 1.0);
    assert!((results[1].distance_km.unwrap() - 111.2).abs() < 1.0);
}

#[tokio::test]
async fn test_auto_match_without_location_uses_lookup_order() {
    let ctx = context();
    let first = add_donor(&ctx.store, "first", BloodType::ONeg, Some("0.0,0.0"), true).await;
    let second = add_donor(&ctx.store, "second", BloodType::ONeg, None, true).await;

    let request = add_request(&ctx.store, BloodType::ONeg, None).await;
    let results = ctx.engine.auto_match(request.id).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].donor.id, first.id);
    assert_eq!(results[1].donor.id, second.id);
    assert!(results.iter().all(|c| c.distance_km.is_none()));
}

#[tokio::test]
async fn test_auto_match_with_unparseable_donor_location_still_matches() {
    let ctx = context();
    let broken = add_donor(&ctx.store, "broken", BloodType::ONeg, Some("not-a-coord"), true).await;
    let near = add_donor(&ctx.store, "near", BloodType::ONeg, Some("0.1,0.1"), true).await;

    let request = add_request(&ctx.store, BloodType::ONeg, Some("0.0,0.0")).await;
    let results = ctx.engine.auto_match(request.id).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].donor.id, near.id);
    assert_eq!(results[1].donor.id, broken.id);
    assert!(results[1].distance_km.is_none());
}

#[tokio::test]
async fn test_auto_match_zero_eligible_donors_is_success() {
    let ctx = context();
    let request = add_request(&ctx.store, BloodType::ONeg, None).await;
    let results = ctx.engine.auto_match(request.id).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_auto_match_dispatches_and_marks_notified() {
    let ctx = context();
    add_donor(&ctx.store, "donor", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::APos, None).await;

    let results = ctx.engine.auto_match(request.id).await.unwrap();
    assert_eq!(ctx.sender.sent_count(), 1);

    let refreshed = MatchStore::find_by_id(&*ctx.store, results[0].donor_match.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.status, MatchStatus::Notified);
}

#[tokio::test]
async fn test_matches_for_request_attaches_distances() {
    let ctx = context();
    add_donor(&ctx.store, "near", BloodType::ONeg, Some("0.0,0.0"), true).await;
    add_donor(&ctx.store, "nowhere", BloodType::ONeg, None, true).await;
    let request = add_request(&ctx.store, BloodType::ONeg, Some("0.0,0.0")).await;

    ctx.engine.auto_match(request.id).await.unwrap();
    let (_, matches) = ctx.engine.matches_for_request(request.id).await.unwrap();

    assert_eq!(matches.len(), 2);
    let with_distance = matches.iter().filter(|m| m.distance_km.is_some()).count();
    assert_eq!(with_distance, 1);
}
