// ABOUTME: Domain data models for admins, refresh tokens, and directory users
// ABOUTME: Storage records stay private to the core; public views strip secrets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! # Data Models
//!
//! Storage-backed records and their public views. The `Admin` record carries
//! the password hash and is never serialized directly; handlers return
//! [`AdminView`] instead. Refresh tokens are plain rows keyed by the token
//! string itself. Directory users support soft deletion via `deleted_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to every admin created through registration
pub const ADMIN_ROLE: &str = "admin";

/// Allowed roles for directory users
pub const USER_ROLES: &[&str] = &["user", "admin", "moderator"];

/// Allowed statuses for directory users
pub const USER_STATUSES: &[&str] = &["active", "inactive", "banned"];

/// Default status for directory users created without one
pub const DEFAULT_USER_STATUS: &str = "active";

/// Default role for directory users created without one
pub const DEFAULT_USER_ROLE: &str = "user";

/// Administrator account record
#[derive(Debug, Clone)]
pub struct Admin {
    /// Unique admin ID
    pub id: Uuid,
    /// Unique email (case-sensitive per storage collation)
    pub email: String,
    /// bcrypt hash, never exposed outside the core
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// Role tag, `"admin"` for registered accounts
    pub role: String,
    /// Inactive admins cannot log in or refresh
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Create a new active admin with the fixed registration role
    #[must_use]
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            role: ADMIN_ROLE.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public admin view returned by the API (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&Admin> for AdminView {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role.clone(),
        }
    }
}

/// Persisted refresh-token session record
///
/// The token string is both a signed credential and the storage lookup key.
/// Rows are hard-deleted on logout; a deleted token never resolves again.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub id: Uuid,
    /// Owning admin; many tokens per admin are permitted
    pub admin_id: Uuid,
    /// The token string, unique across all rows
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Create a new session row for an issued refresh token
    #[must_use]
    pub fn new(admin_id: Uuid, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            admin_id,
            token,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Whether the row has passed its expiry
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Directory user record managed by the admin API
///
/// Soft-deleted: `deleted_at` is set instead of removing the row, and deleted
/// users are invisible to every read path.
#[derive(Debug, Clone)]
pub struct DirectoryUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Optional; absent and cleared are distinct states in updates
    pub phone: Option<String>,
    pub role: String,
    pub status: String,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Public directory user view with RFC 3339 timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryUserView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: String,
    pub status: String,
    pub is_email_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&DirectoryUser> for DirectoryUserView {
    fn from(user: &DirectoryUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
            status: user.status.clone(),
            is_email_verified: user.is_email_verified,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}
