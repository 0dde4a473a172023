// ABOUTME: Database factory that selects a backend from the connection URL
// ABOUTME: Wraps SQLite and PostgreSQL implementations behind a single enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! Database backend selection
//!
//! `Database::new` inspects the connection URL and constructs the matching
//! backend. PostgreSQL support compiles in only with the `postgresql` feature.

use super::{DatabaseProvider, UserListQuery, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::models::{Admin, DirectoryUser, RefreshTokenRecord};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg(feature = "postgresql")]
use super::postgres::PostgresDatabase;
use super::sqlite::SqliteDatabase;

/// Database abstraction dispatching to the configured backend
#[derive(Clone)]
pub enum Database {
    SQLite(SqliteDatabase),
    #[cfg(feature = "postgresql")]
    PostgreSQL(PostgresDatabase),
}

impl Database {
    /// Human-readable backend name for startup logging
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite",
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(_) => "PostgreSQL",
        }
    }
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn new(database_url: &str) -> AppResult<Self> {
        if database_url.starts_with("postgresql://") || database_url.starts_with("postgres://") {
            #[cfg(feature = "postgresql")]
            {
                tracing::info!("Using PostgreSQL database backend");
                let db = PostgresDatabase::new(database_url).await?;
                return Ok(Self::PostgreSQL(db));
            }

            #[cfg(not(feature = "postgresql"))]
            {
                return Err(AppError::internal(
                    "PostgreSQL support not compiled in. Enable the 'postgresql' feature",
                ));
            }
        }

        tracing::info!("Using SQLite database backend");
        let db = SqliteDatabase::new(database_url).await?;
        Ok(Self::SQLite(db))
    }

    async fn migrate(&self) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.migrate().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.migrate().await,
        }
    }

    async fn create_admin(&self, admin: &Admin) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.create_admin(admin).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.create_admin(admin).await,
        }
    }

    async fn get_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        match self {
            Self::SQLite(db) => db.get_admin_by_email(email).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_admin_by_email(email).await,
        }
    }

    async fn get_admin_by_id(&self, id: Uuid) -> AppResult<Option<Admin>> {
        match self {
            Self::SQLite(db) => db.get_admin_by_id(id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_admin_by_id(id).await,
        }
    }

    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.create_refresh_token(record).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.create_refresh_token(record).await,
        }
    }

    async fn get_refresh_token(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        match self {
            Self::SQLite(db) => db.get_refresh_token(token).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_refresh_token(token).await,
        }
    }

    async fn delete_refresh_token(&self, token: &str) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.delete_refresh_token(token).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.delete_refresh_token(token).await,
        }
    }

    async fn delete_refresh_tokens_for_admin(&self, admin_id: Uuid) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.delete_refresh_tokens_for_admin(admin_id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.delete_refresh_tokens_for_admin(admin_id).await,
        }
    }

    async fn delete_expired_refresh_tokens(&self) -> AppResult<u64> {
        match self {
            Self::SQLite(db) => db.delete_expired_refresh_tokens().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.delete_expired_refresh_tokens().await,
        }
    }

    async fn create_user(&self, user: &DirectoryUser) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.create_user(user).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.create_user(user).await,
        }
    }

    async fn get_user(&self, id: Uuid) -> AppResult<Option<DirectoryUser>> {
        match self {
            Self::SQLite(db) => db.get_user(id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_user(id).await,
        }
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<DirectoryUser>> {
        match self {
            Self::SQLite(db) => db.get_user_by_email(email).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_user_by_email(email).await,
        }
    }

    async fn list_users(&self, query: &UserListQuery) -> AppResult<(Vec<DirectoryUser>, u64)> {
        match self {
            Self::SQLite(db) => db.list_users(query).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.list_users(query).await,
        }
    }

    async fn update_user(&self, id: Uuid, update: &UserUpdate) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.update_user(id, update).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.update_user(id, update).await,
        }
    }

    async fn soft_delete_user(&self, id: Uuid) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.soft_delete_user(id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.soft_delete_user(id).await,
        }
    }
}
