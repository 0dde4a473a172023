// ABOUTME: Storage contract tests for the database abstraction
// ABOUTME: Verifies lookup-miss semantics, token purging and on-disk persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

mod common;

use backoffice::database_plugins::factory::Database;
use backoffice::database_plugins::DatabaseProvider;
use backoffice::models::{Admin, RefreshTokenRecord};
use chrono::{Duration, Utc};
use uuid::Uuid;

fn sample_admin(email: &str) -> Admin {
    Admin::new(
        email.to_string(),
        "$2b$04$notarealhashbutlongenough".to_string(),
        "Sample".to_string(),
    )
}

#[tokio::test]
async fn lookup_miss_is_none_not_an_error() {
    let db = common::test_database().await;

    assert!(db.get_admin_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(db.get_admin_by_id(Uuid::new_v4()).await.unwrap().is_none());
    assert!(db.get_refresh_token("missing").await.unwrap().is_none());
    assert!(db.get_user(Uuid::new_v4()).await.unwrap().is_none());
    assert!(db.get_user_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn admin_round_trips_with_timestamps() {
    let db = common::test_database().await;
    let admin = sample_admin("a@example.com");
    db.create_admin(&admin).await.unwrap();

    let loaded = db.get_admin_by_email("a@example.com").await.unwrap().unwrap();
    assert_eq!(loaded.id, admin.id);
    assert_eq!(loaded.password_hash, admin.password_hash);
    assert!(loaded.is_active);
    assert_eq!(
        loaded.created_at.timestamp_millis(),
        admin.created_at.timestamp_millis()
    );
}

#[tokio::test]
async fn expired_token_purge_only_removes_expired_rows() {
    let db = common::test_database().await;
    let admin = sample_admin("a@example.com");
    db.create_admin(&admin).await.unwrap();

    let live = RefreshTokenRecord::new(
        admin.id,
        "live-token".to_string(),
        Utc::now() + Duration::days(7),
    );
    let stale = RefreshTokenRecord::new(
        admin.id,
        "stale-token".to_string(),
        Utc::now() - Duration::hours(1),
    );
    db.create_refresh_token(&live).await.unwrap();
    db.create_refresh_token(&stale).await.unwrap();

    let purged = db.delete_expired_refresh_tokens().await.unwrap();
    assert_eq!(purged, 1);
    assert!(db.get_refresh_token("live-token").await.unwrap().is_some());
    assert!(db.get_refresh_token("stale-token").await.unwrap().is_none());
}

#[tokio::test]
async fn admin_wide_revocation_removes_every_session() {
    let db = common::test_database().await;
    let admin = sample_admin("a@example.com");
    let other = sample_admin("b@example.com");
    db.create_admin(&admin).await.unwrap();
    db.create_admin(&other).await.unwrap();

    for token in ["one", "two"] {
        db.create_refresh_token(&RefreshTokenRecord::new(
            admin.id,
            token.to_string(),
            Utc::now() + Duration::days(1),
        ))
        .await
        .unwrap();
    }
    db.create_refresh_token(&RefreshTokenRecord::new(
        other.id,
        "theirs".to_string(),
        Utc::now() + Duration::days(1),
    ))
    .await
    .unwrap();

    db.delete_refresh_tokens_for_admin(admin.id).await.unwrap();
    assert!(db.get_refresh_token("one").await.unwrap().is_none());
    assert!(db.get_refresh_token("two").await.unwrap().is_none());
    assert!(db.get_refresh_token("theirs").await.unwrap().is_some());
}

#[tokio::test]
async fn file_backed_database_persists_across_reconnects() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("test.db").display());

    let admin = sample_admin("a@example.com");
    {
        let db = Database::new(&url).await.unwrap();
        db.create_admin(&admin).await.unwrap();
    }

    let db = Database::new(&url).await.unwrap();
    let loaded = db.get_admin_by_email("a@example.com").await.unwrap().unwrap();
    assert_eq!(loaded.id, admin.id);
}
