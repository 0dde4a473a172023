// ABOUTME: Directory user service with validated create, update, listing and soft delete
// ABOUTME: Enforces role and status vocabularies before anything touches the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! User directory management
//!
//! Directory users are records administered through the backoffice, not login
//! accounts. Deletion is a soft delete: the row keeps its history but drops
//! out of every read path.

use crate::database_plugins::{factory::Database, DatabaseProvider, UserListQuery, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::models::{
    DirectoryUser, DirectoryUserView, DEFAULT_USER_ROLE, DEFAULT_USER_STATUS, USER_ROLES,
    USER_STATUSES,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Largest page size the list endpoint will serve
pub const MAX_PAGE_SIZE: u32 = 100;
/// Page size used when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Input for creating a directory user
///
/// New users always start unverified; there is no way to create one with
/// `is_email_verified` already set.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// One page of directory users plus pagination totals
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub users: Vec<DirectoryUserView>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

fn validate_role(role: &str) -> AppResult<()> {
    if USER_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(AppError::invalid_role())
    }
}

fn validate_status(status: &str) -> AppResult<()> {
    if USER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::invalid_status())
    }
}

/// Directory user management
#[derive(Clone)]
pub struct UserService {
    database: Database,
}

impl UserService {
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// List directory users with filtering, search and pagination
    ///
    /// Page numbers are 1-based. Out-of-range page and limit values are
    /// clamped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a status or role filter is not in the
    /// accepted vocabulary.
    pub async fn list_users(&self, mut query: UserListQuery) -> AppResult<UserPage> {
        query.page = query.page.max(1);
        if query.limit == 0 {
            query.limit = DEFAULT_PAGE_SIZE;
        }
        query.limit = query.limit.min(MAX_PAGE_SIZE);

        for status in &query.statuses {
            validate_status(status)?;
        }
        for role in &query.roles {
            validate_role(role)?;
        }

        let (users, total) = self.database.list_users(&query).await?;
        let total_pages = total.div_ceil(u64::from(query.limit));

        Ok(UserPage {
            users: users.iter().map(DirectoryUserView::from).collect(),
            total,
            page: query.page,
            limit: query.limit,
            total_pages,
        })
    }

    /// Create a directory user
    ///
    /// Role and status default to `user` and `active` when omitted.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email, empty name or
    /// unknown role/status, and `UserAlreadyExists` when a live (not
    /// soft-deleted) user already holds the email.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<DirectoryUserView> {
        let email = new_user.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::invalid_email());
        }
        let name = new_user.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::invalid_name());
        }

        let role = new_user.role.unwrap_or_else(|| DEFAULT_USER_ROLE.to_string());
        validate_role(&role)?;
        let status = new_user
            .status
            .unwrap_or_else(|| DEFAULT_USER_STATUS.to_string());
        validate_status(&status)?;

        if self.database.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::user_already_exists());
        }

        let now = Utc::now();
        let user = DirectoryUser {
            id: Uuid::new_v4(),
            email,
            name,
            phone: new_user.phone,
            role,
            status,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.database.create_user(&user).await?;

        tracing::info!(user_id = %user.id, "Created directory user");
        Ok(DirectoryUserView::from(&user))
    }

    /// Fetch one directory user
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` for unknown or soft-deleted users.
    pub async fn get_user(&self, id: Uuid) -> AppResult<DirectoryUserView> {
        let Some(user) = self.database.get_user(id).await? else {
            return Err(AppError::user_not_found());
        };
        Ok(DirectoryUserView::from(&user))
    }

    /// Apply a partial update and return the fresh record
    ///
    /// Omitted fields are untouched. An update carrying no fields is a no-op
    /// that still verifies the user exists.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown role/status or empty name
    /// and `UserNotFound` for unknown or soft-deleted users.
    pub async fn update_user(&self, id: Uuid, update: UserUpdate) -> AppResult<DirectoryUserView> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::invalid_name());
            }
        }
        if let Some(role) = &update.role {
            validate_role(role)?;
        }
        if let Some(status) = &update.status {
            validate_status(status)?;
        }

        if update.is_empty() {
            return self.get_user(id).await;
        }

        self.database.update_user(id, &update).await?;
        self.get_user(id).await
    }

    /// Soft-delete a directory user
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` for unknown or already-deleted users.
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.database.soft_delete_user(id).await?;
        tracing::info!(user_id = %id, "Soft-deleted directory user");
        Ok(())
    }
}
