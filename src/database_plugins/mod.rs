// ABOUTME: Database abstraction layer for the Backoffice admin backend
// ABOUTME: Plugin architecture with SQLite and PostgreSQL backends over sqlx
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! # Storage Abstraction
//!
//! All cross-request state lives behind [`DatabaseProvider`]. Lookup methods
//! return `Ok(None)` on a miss so callers can tell "doesn't exist" (a business
//! condition) apart from "storage unavailable" (an infrastructure failure
//! propagated as `Err`).
//!
//! Uniqueness of admin emails and token strings is enforced by database
//! constraints; the check-then-insert pattern in the service layer is not
//! atomic on its own, and a constraint violation surfaces as the matching
//! conflict error.

use crate::errors::{AppError, AppResult};
use crate::models::{Admin, DirectoryUser, RefreshTokenRecord};
use async_trait::async_trait;
use uuid::Uuid;

pub mod factory;
pub mod sqlite;

#[cfg(feature = "postgresql")]
pub mod postgres;

/// Sort direction for directory listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filter, sort, and pagination parameters for directory listings
///
/// `page` and `limit` are assumed pre-clamped by the service layer.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: u32,
    pub limit: u32,
    /// Case-insensitive substring match over email and name
    pub search: Option<String>,
    pub statuses: Vec<String>,
    pub roles: Vec<String>,
    /// Sort column; must be one of [`SORTABLE_COLUMNS`]
    pub sort: Option<String>,
    pub order: SortOrder,
}

/// Columns a directory listing may sort by
///
/// Sort input is interpolated into SQL, so anything outside this list falls
/// back to `created_at`.
pub const SORTABLE_COLUMNS: &[&str] = &["created_at", "updated_at", "email", "name", "role", "status"];

/// Resolve a requested sort column against the whitelist
#[must_use]
pub fn sort_column(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|col| SORTABLE_COLUMNS.iter().find(|&&c| c == col))
        .copied()
        .unwrap_or("created_at")
}

/// Partial update for a directory user
///
/// `None` means "not provided, keep the current value". For `phone`,
/// `Some(None)` means "explicitly cleared" - the two states stay
/// distinguishable all the way down to the SQL.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl UserUpdate {
    /// Whether the update carries any change at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.status.is_none()
    }
}

/// Map a sqlx error to a conflict when it is a unique-constraint violation,
/// and to a generic database error otherwise
pub(crate) fn conflict_on_unique(error: sqlx::Error, conflict: AppError) -> AppError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => conflict,
        _ => AppError::database(error.to_string()),
    }
}

/// Core database abstraction trait
///
/// All backends implement this trait to provide a consistent interface for
/// the service layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Create a new database connection
    async fn new(database_url: &str) -> AppResult<Self>
    where
        Self: Sized;

    /// Run migrations to set up the schema
    async fn migrate(&self) -> AppResult<()>;

    // ================================
    // Admin accounts
    // ================================

    /// Create a new admin account; duplicate email is `AdminAlreadyExists`
    async fn create_admin(&self, admin: &Admin) -> AppResult<()>;

    /// Get admin by email (case-sensitive)
    async fn get_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>>;

    /// Get admin by ID
    async fn get_admin_by_id(&self, id: Uuid) -> AppResult<Option<Admin>>;

    // ================================
    // Refresh tokens
    // ================================

    /// Persist a new refresh-token session row
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> AppResult<()>;

    /// Look up a session row by exact token string
    async fn get_refresh_token(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>>;

    /// Hard-delete a session row; deleting a missing token succeeds
    async fn delete_refresh_token(&self, token: &str) -> AppResult<()>;

    /// Hard-delete every session row owned by an admin
    async fn delete_refresh_tokens_for_admin(&self, admin_id: Uuid) -> AppResult<()>;

    /// Maintenance: purge rows whose expiry has passed, returning the count
    async fn delete_expired_refresh_tokens(&self) -> AppResult<u64>;

    // ================================
    // User directory
    // ================================

    /// Create a directory user
    async fn create_user(&self, user: &DirectoryUser) -> AppResult<()>;

    /// Get a non-deleted user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<Option<DirectoryUser>>;

    /// Get a non-deleted user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<DirectoryUser>>;

    /// List non-deleted users matching the query, with the unpaged total
    async fn list_users(&self, query: &UserListQuery) -> AppResult<(Vec<DirectoryUser>, u64)>;

    /// Apply a partial update; `UserNotFound` when no non-deleted row matches
    async fn update_user(&self, id: Uuid, update: &UserUpdate) -> AppResult<()>;

    /// Soft-delete a user by setting `deleted_at`
    async fn soft_delete_user(&self, id: Uuid) -> AppResult<()>;
}
