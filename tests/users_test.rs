// ABOUTME: Integration tests for the user directory service
// ABOUTME: Covers create, list filtering and pagination, partial update and soft delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

mod common;

use backoffice::database_plugins::{SortOrder, UserListQuery, UserUpdate};
use backoffice::errors::ErrorCode;
use backoffice::services::users::NewUser;
use uuid::Uuid;

fn new_user(email: &str, name: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: name.to_string(),
        ..NewUser::default()
    }
}

#[tokio::test]
async fn create_applies_defaults_and_validates() {
    let service = common::test_user_service().await;

    let user = service
        .create_user(new_user("alice@example.com", "Alice"))
        .await
        .unwrap();
    assert_eq!(user.role, "user");
    assert_eq!(user.status, "active");
    assert!(!user.is_email_verified);

    let err = service
        .create_user(new_user("no-at-sign", "Bob"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidEmail);

    let err = service
        .create_user(new_user("bob@example.com", " "))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidName);

    let err = service
        .create_user(NewUser {
            role: Some("superuser".to_string()),
            ..new_user("bob@example.com", "Bob")
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRole);

    let err = service
        .create_user(NewUser {
            status: Some("paused".to_string()),
            ..new_user("bob@example.com", "Bob")
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatus);
}

#[tokio::test]
async fn create_rejects_duplicate_live_email() {
    let service = common::test_user_service().await;

    service
        .create_user(new_user("alice@example.com", "Alice"))
        .await
        .unwrap();
    let err = service
        .create_user(new_user("alice@example.com", "Imposter"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UserAlreadyExists);
}

#[tokio::test]
async fn list_filters_searches_and_paginates() {
    let service = common::test_user_service().await;

    for i in 0..5 {
        service
            .create_user(new_user(&format!("user{i}@example.com"), &format!("User {i}")))
            .await
            .unwrap();
    }
    service
        .create_user(NewUser {
            status: Some("banned".to_string()),
            ..new_user("troll@example.com", "Troll")
        })
        .await
        .unwrap();
    service
        .create_user(NewUser {
            role: Some("moderator".to_string()),
            ..new_user("mod@example.com", "Moody Mod")
        })
        .await
        .unwrap();

    let all = service.list_users(UserListQuery::default()).await.unwrap();
    assert_eq!(all.total, 7);

    let banned = service
        .list_users(UserListQuery {
            statuses: vec!["banned".to_string()],
            ..UserListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(banned.total, 1);
    assert_eq!(banned.users[0].email, "troll@example.com");

    let mods = service
        .list_users(UserListQuery {
            roles: vec!["moderator".to_string()],
            ..UserListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(mods.total, 1);

    // Search matches name or email, case-insensitively for ASCII
    let search = service
        .list_users(UserListQuery {
            search: Some("moody".to_string()),
            ..UserListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(search.total, 1);

    let page = service
        .list_users(UserListQuery {
            page: 2,
            limit: 3,
            sort: Some("email".to_string()),
            order: SortOrder::Asc,
            ..UserListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 7);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.users.len(), 3);

    let err = service
        .list_users(UserListQuery {
            statuses: vec!["frozen".to_string()],
            ..UserListQuery::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatus);
}

#[tokio::test]
async fn list_clamps_page_and_limit() {
    let service = common::test_user_service().await;
    service
        .create_user(new_user("alice@example.com", "Alice"))
        .await
        .unwrap();

    let page = service
        .list_users(UserListQuery {
            page: 0,
            limit: 10_000,
            ..UserListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 100);

    // An unspecified limit falls back to 10 per page
    let page = service.list_users(UserListQuery::default()).await.unwrap();
    assert_eq!(page.limit, 10);
}

#[tokio::test]
async fn list_survives_extreme_page_numbers() {
    let service = common::test_user_service().await;
    service
        .create_user(new_user("alice@example.com", "Alice"))
        .await
        .unwrap();

    let page = service
        .list_users(UserListQuery {
            page: u32::MAX,
            limit: 100,
            ..UserListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(page.users.is_empty());
}

#[tokio::test]
async fn update_is_partial_and_can_clear_phone() {
    let service = common::test_user_service().await;
    let user = service
        .create_user(NewUser {
            phone: Some("+111".to_string()),
            ..new_user("alice@example.com", "Alice")
        })
        .await
        .unwrap();
    let id: Uuid = user.id;

    let updated = service
        .update_user(
            id,
            UserUpdate {
                name: Some("Alicia".to_string()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.phone.as_deref(), Some("+111"));

    let cleared = service
        .update_user(
            id,
            UserUpdate {
                phone: Some(None),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.phone, None);
    assert_eq!(cleared.name, "Alicia");

    // An empty update is a no-op that still returns the record
    let noop = service.update_user(id, UserUpdate::default()).await.unwrap();
    assert_eq!(noop.name, "Alicia");

    let err = service
        .update_user(
            id,
            UserUpdate {
                status: Some("frozen".to_string()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatus);
}

#[tokio::test]
async fn soft_delete_hides_the_user_and_frees_the_email() {
    let service = common::test_user_service().await;
    let user = service
        .create_user(new_user("alice@example.com", "Alice"))
        .await
        .unwrap();

    service.delete_user(user.id).await.unwrap();

    let err = service.get_user(user.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UserNotFound);

    let err = service.delete_user(user.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UserNotFound);

    let err = service
        .update_user(
            user.id,
            UserUpdate {
                name: Some("Ghost".to_string()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UserNotFound);

    let listed = service.list_users(UserListQuery::default()).await.unwrap();
    assert_eq!(listed.total, 0);

    // The email is available again once its holder is soft-deleted
    service
        .create_user(new_user("alice@example.com", "Alice Again"))
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_user_reads_as_not_found() {
    let service = common::test_user_service().await;

    let err = service.get_user(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UserNotFound);
}
