// ABOUTME: Authentication service handling admin registration, login and session lifecycle
// ABOUTME: Issues JWT access tokens and persists opaque refresh tokens in the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! Admin authentication
//!
//! Login and registration hand back an access/refresh token pair. The refresh
//! token is stored verbatim and doubles as the database lookup key, so logout
//! is a hard delete and a deleted token can never mint another access token.
//! Refresh does not rotate: a valid refresh token may be presented any number
//! of times until it expires or is revoked.

use crate::auth::TokenManager;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::{AppError, AppResult};
use crate::models::{Admin, AdminView, RefreshTokenRecord};
use crate::password::PasswordHasher;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Minimum accepted password length for new admin accounts
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Token pair plus admin profile returned by register and login
#[derive(Debug, Clone, Serialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub admin: AdminView,
}

/// Admin authentication and session management
#[derive(Clone)]
pub struct AuthService {
    database: Database,
    token_manager: Arc<TokenManager>,
    password_hasher: PasswordHasher,
}

impl AuthService {
    #[must_use]
    pub fn new(
        database: Database,
        token_manager: Arc<TokenManager>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            database,
            token_manager,
            password_hasher,
        }
    }

    /// Register a new admin account and open a session
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty email, short password or
    /// empty name, and `AdminAlreadyExists` when the email is taken.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> AppResult<SessionTokens> {
        if email.is_empty() {
            return Err(AppError::invalid_email());
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_password());
        }
        if name.is_empty() {
            return Err(AppError::invalid_name());
        }

        if self.database.get_admin_by_email(email).await?.is_some() {
            return Err(AppError::admin_already_exists());
        }

        let password_hash = self.hash_password(password.to_string()).await?;
        let admin = Admin::new(email.to_string(), password_hash, name.to_string());
        self.database.create_admin(&admin).await?;

        tracing::info!(admin_id = %admin.id, "Registered new admin account");
        self.open_session(&admin).await
    }

    /// Authenticate an admin by email and password
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty email or password before any
    /// storage access, `Unauthorized` for a deactivated account, and
    /// `InvalidCredentials` for an unknown email or wrong password. The last
    /// two causes are deliberately indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionTokens> {
        if email.is_empty() {
            return Err(AppError::invalid_email());
        }
        if password.is_empty() {
            return Err(AppError::invalid_password());
        }

        let Some(admin) = self.database.get_admin_by_email(email).await? else {
            return Err(AppError::invalid_credentials());
        };

        if !admin.is_active {
            return Err(AppError::unauthorized("admin account is inactive"));
        }

        if !self
            .verify_password(admin.password_hash.clone(), password.to_string())
            .await?
        {
            return Err(AppError::invalid_credentials());
        }

        tracing::info!(admin_id = %admin.id, "Admin logged in");
        self.open_session(&admin).await
    }

    /// Exchange a valid refresh token for a fresh access token
    ///
    /// The refresh token itself is untouched and stays valid until it expires
    /// or the session is logged out.
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` for a malformed, forged or revoked token,
    /// `ExpiredToken` past the refresh TTL, and `Unauthorized` when the
    /// owning admin no longer exists or has been deactivated.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.token_manager.validate_token(refresh_token)?;
        let admin_id = claims.admin_id()?;

        let Some(record) = self.database.get_refresh_token(refresh_token).await? else {
            return Err(AppError::invalid_token());
        };

        // The row is left in place; expired rows are removed by the
        // out-of-band purge, not by lookups
        if record.is_expired(Utc::now()) {
            return Err(AppError::expired_token());
        }

        let Some(admin) = self.database.get_admin_by_id(admin_id).await? else {
            return Err(AppError::unauthorized("admin account no longer exists"));
        };
        if !admin.is_active {
            return Err(AppError::unauthorized("admin account is inactive"));
        }

        self.token_manager
            .generate_access_token(admin.id, &admin.email, &admin.role)
    }

    /// Revoke a refresh token, ending its session
    ///
    /// Idempotent: logging out an unknown or already-revoked token succeeds.
    ///
    /// # Errors
    ///
    /// Returns a database error only on infrastructure failure.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        self.database.delete_refresh_token(refresh_token).await
    }

    /// Look up the admin behind an authenticated request
    ///
    /// An inactive admin still sees their own profile; deactivation bites at
    /// login and refresh, not here.
    ///
    /// # Errors
    ///
    /// Returns `AdminNotFound` when the account was removed after the access
    /// token was issued.
    pub async fn get_current_admin(&self, admin_id: Uuid) -> AppResult<AdminView> {
        let Some(admin) = self.database.get_admin_by_id(admin_id).await? else {
            return Err(AppError::admin_not_found());
        };

        Ok(AdminView::from(&admin))
    }

    async fn open_session(&self, admin: &Admin) -> AppResult<SessionTokens> {
        let access_token =
            self.token_manager
                .generate_access_token(admin.id, &admin.email, &admin.role)?;
        let refresh_token = self.token_manager.generate_refresh_token(admin.id)?;

        let record = RefreshTokenRecord::new(
            admin.id,
            refresh_token.clone(),
            self.token_manager.refresh_expiry_from(Utc::now()),
        );
        self.database.create_refresh_token(&record).await?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
            admin: AdminView::from(admin),
        })
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))?
    }

    async fn verify_password(&self, hash: String, candidate: String) -> AppResult<bool> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &candidate))
            .await
            .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))
    }
}
