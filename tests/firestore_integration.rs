// SPDX-License-Identifier: MIT

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (set FIRESTORE_EMULATOR_HOST). The service layer is exercised
//! end to end against a real store: create/read/update/delete,
//! ownership enforcement, pagination, and the weekly report.

use jog_tracker::error::AppError;
use jog_tracker::models::{CreateJogRequest, Location, UpdateJogRequest};
use jog_tracker::services::{JogService, ReportService};

mod common;
use common::test_db;

/// Generate a unique user id for test isolation.
fn unique_user_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("user-{}", nanos)
}

/// Helper to build a valid create payload.
fn jog_request(distance: f64, time_seconds: f64, date: &str) -> CreateJogRequest {
    CreateJogRequest {
        time_seconds,
        distance,
        date: date.parse().unwrap(),
        location: Location {
            lat: 37.42,
            lon: -122.15,
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CRUD TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_then_find_roundtrip() {
    require_emulator!();

    let service = JogService::new(test_db().await);
    let user_id = unique_user_id();

    let created = service
        .create(jog_request(5.0, 1800.0, "2024-01-03T08:00:00Z"), &user_id)
        .await
        .unwrap();

    // The store assigned an id and the service attached the owner
    assert!(!created.id.is_empty(), "Created jog should have an id");
    assert_eq!(created.user_id, user_id);

    let fetched = service.find_by_id(&created.id, &user_id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.distance, 5.0);
    assert_eq!(fetched.time_seconds, 1800.0);
    assert_eq!(fetched.date, created.date);
    assert_eq!(fetched.location, created.location);
    assert_eq!(fetched.user_id, user_id);
}

#[tokio::test]
async fn test_find_missing_id_is_not_found() {
    require_emulator!();

    let service = JogService::new(test_db().await);

    let err = service
        .find_by_id("no-such-jog", &unique_user_id())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_create_rejects_invalid_payload() {
    require_emulator!();

    let service = JogService::new(test_db().await);

    let err = service
        .create(jog_request(5.0, 0.0, "2024-01-03T08:00:00Z"), "user-1")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_merges_and_returns_post_update_record() {
    require_emulator!();

    let service = JogService::new(test_db().await);
    let user_id = unique_user_id();

    let created = service
        .create(jog_request(5.0, 1800.0, "2024-01-03T08:00:00Z"), &user_id)
        .await
        .unwrap();

    let patch = UpdateJogRequest {
        distance: Some(7.5),
        ..Default::default()
    };
    let updated = service
        .update_by_id(&created.id, patch, &user_id)
        .await
        .unwrap();

    // Patched field changed, everything else survived the merge
    assert_eq!(updated.distance, 7.5);
    assert_eq!(updated.time_seconds, 1800.0);
    assert_eq!(updated.user_id, user_id);

    let fetched = service.find_by_id(&created.id, &user_id).await.unwrap();
    assert_eq!(fetched.distance, 7.5);
}

#[tokio::test]
async fn test_update_missing_id_is_not_found_and_writes_nothing() {
    require_emulator!();

    let service = JogService::new(test_db().await);
    let user_id = unique_user_id();

    let patch = UpdateJogRequest {
        distance: Some(9.9),
        ..Default::default()
    };
    let err = service
        .update_by_id("no-such-jog", patch, &user_id)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));

    // Nothing was created by the failed update
    let err = service.find_by_id("no-such-jog", &user_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_returns_record_and_is_durable() {
    require_emulator!();

    let service = JogService::new(test_db().await);
    let user_id = unique_user_id();

    let created = service
        .create(jog_request(5.0, 1800.0, "2024-01-03T08:00:00Z"), &user_id)
        .await
        .unwrap();

    let deleted = service.delete_by_id(&created.id, &user_id).await.unwrap();

    // Returns the record as it existed immediately before deletion
    assert_eq!(deleted.id, created.id);
    assert_eq!(deleted.distance, 5.0);

    // Delete is durable
    let err = service.find_by_id(&created.id, &user_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service.delete_by_id(&created.id, &user_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ═══════════════════════════════════════════════════════════════════════════
// OWNERSHIP TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_cross_user_access_is_forbidden() {
    require_emulator!();

    let service = JogService::new(test_db().await);
    let owner = unique_user_id();
    let intruder = unique_user_id();

    let created = service
        .create(jog_request(5.0, 1800.0, "2024-01-03T08:00:00Z"), &owner)
        .await
        .unwrap();

    let err = service.find_by_id(&created.id, &intruder).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let patch = UpdateJogRequest {
        distance: Some(1.0),
        ..Default::default()
    };
    let err = service
        .update_by_id(&created.id, patch, &intruder)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = service
        .delete_by_id(&created.id, &intruder)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // The record is untouched for its owner
    let fetched = service.find_by_id(&created.id, &owner).await.unwrap();
    assert_eq!(fetched.distance, 5.0);
}

// ═══════════════════════════════════════════════════════════════════════════
// PAGINATION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_pages_hold_at_most_two_and_do_not_overlap() {
    require_emulator!();

    let service = JogService::new(test_db().await);
    let user_id = unique_user_id();

    // Ensure there are at least 3 records in the collection
    for i in 0..3 {
        service
            .create(
                jog_request(1.0 + i as f64, 600.0, "2024-01-03T08:00:00Z"),
                &user_id,
            )
            .await
            .unwrap();
    }

    let page1 = service.find_all(1).await.unwrap();
    let page2 = service.find_all(2).await.unwrap();

    assert_eq!(page1.len(), 2, "Page size is fixed at 2");
    assert!(!page2.is_empty());
    assert!(page2.len() <= 2);

    let ids1: Vec<&str> = page1.iter().map(|j| j.id.as_str()).collect();
    for jog in &page2 {
        assert!(!ids1.contains(&jog.id.as_str()), "Pages must not overlap");
    }
}

#[tokio::test]
async fn test_out_of_range_page_is_empty_not_an_error() {
    require_emulator!();

    let service = JogService::new(test_db().await);

    let jogs = service.find_all(100_000).await.unwrap();
    assert!(jogs.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// WEEKLY REPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_weekly_report_empty_match_set_is_zeroed() {
    require_emulator!();

    let reports = ReportService::new(test_db().await);
    let user_id = unique_user_id();

    let from = "2024-01-01T00:00:00Z".parse().unwrap();
    let to = "2024-01-07T23:59:59Z".parse().unwrap();

    let report = reports
        .generate_weekly_report(&user_id, from, to)
        .await
        .unwrap();

    assert_eq!(report.from, from);
    assert_eq!(report.to, to);
    assert_eq!(report.total_distance, 0.0);
    assert_eq!(report.total_time_seconds, 0.0);
    assert_eq!(report.avg_time_seconds, 0.0);
    assert_eq!(report.avg_speed, 0.0);
}

#[tokio::test]
async fn test_weekly_report_aggregates_only_matching_jogs() {
    require_emulator!();

    let db = test_db().await;
    let service = JogService::new(db.clone());
    let reports = ReportService::new(db);
    let user_id = unique_user_id();

    // Two jogs in range: speeds 10 and 20 distance/hour
    service
        .create(jog_request(10.0, 3600.0, "2024-01-02T09:00:00Z"), &user_id)
        .await
        .unwrap();
    service
        .create(jog_request(10.0, 1800.0, "2024-01-05T09:00:00Z"), &user_id)
        .await
        .unwrap();
    // Outside the range: must not be counted
    service
        .create(jog_request(99.0, 3600.0, "2024-02-01T09:00:00Z"), &user_id)
        .await
        .unwrap();
    // Another user's jog in range: must not be counted
    service
        .create(
            jog_request(50.0, 3600.0, "2024-01-03T09:00:00Z"),
            &unique_user_id(),
        )
        .await
        .unwrap();

    let from = "2024-01-01T00:00:00Z".parse().unwrap();
    let to = "2024-01-07T23:59:59Z".parse().unwrap();
    let report = reports
        .generate_weekly_report(&user_id, from, to)
        .await
        .unwrap();

    assert_eq!(report.total_distance, 20.0);
    assert_eq!(report.total_time_seconds, 5400.0);
    assert_eq!(report.avg_time_seconds, 2700.0);
    // Mean of per-jog speeds (10 and 20), not 20 / 1.5h ≈ 13.33
    assert_eq!(report.avg_speed, 15.0);
}

#[tokio::test]
async fn test_weekly_report_bounds_are_inclusive() {
    require_emulator!();

    let db = test_db().await;
    let service = JogService::new(db.clone());
    let reports = ReportService::new(db);
    let user_id = unique_user_id();

    // Exactly on each bound
    service
        .create(jog_request(1.0, 600.0, "2024-01-01T00:00:00Z"), &user_id)
        .await
        .unwrap();
    service
        .create(jog_request(2.0, 600.0, "2024-01-07T00:00:00Z"), &user_id)
        .await
        .unwrap();
    // Fractional seconds within the from bound's second: still in range.
    // A variable-precision rendering would sort this before the bound.
    service
        .create(jog_request(0.25, 600.0, "2024-01-01T00:00:00.5Z"), &user_id)
        .await
        .unwrap();

    let from = "2024-01-01T00:00:00Z".parse().unwrap();
    let to = "2024-01-07T00:00:00Z".parse().unwrap();
    let report = reports
        .generate_weekly_report(&user_id, from, to)
        .await
        .unwrap();

    assert_eq!(report.total_distance, 3.25);
}
