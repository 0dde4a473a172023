// ABOUTME: Business logic services sitting between HTTP routes and the database
// ABOUTME: Auth service owns session lifecycle, user service owns the directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

pub mod auth;
pub mod users;

pub use auth::AuthService;
pub use users::UserService;
