// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds in-memory databases and services with fast test settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

// Not every test binary uses every helper
#![allow(dead_code)]

use backoffice::auth::TokenManager;
use backoffice::database_plugins::factory::Database;
use backoffice::database_plugins::DatabaseProvider;
use backoffice::password::PasswordHasher;
use backoffice::services::{AuthService, UserService};
use chrono::Duration;
use std::sync::Arc;

/// Bcrypt cost low enough to keep tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

pub async fn test_database() -> Database {
    Database::new("sqlite::memory:")
        .await
        .expect("in-memory database should initialize")
}

pub fn test_token_manager() -> Arc<TokenManager> {
    Arc::new(TokenManager::new(
        "test-secret-not-for-production",
        Duration::minutes(15),
        Duration::days(7),
    ))
}

pub async fn test_auth_service() -> (AuthService, Database) {
    let database = test_database().await;
    let service = AuthService::new(
        database.clone(),
        test_token_manager(),
        PasswordHasher::new(TEST_BCRYPT_COST),
    );
    (service, database)
}

pub async fn test_user_service() -> UserService {
    UserService::new(test_database().await)
}
