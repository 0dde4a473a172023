// ABOUTME: HTTP middleware for authentication and CORS
// ABOUTME: Applied to the axum router during assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

pub mod auth;
pub mod cors;

pub use auth::{require_auth, AuthenticatedAdmin};
pub use cors::setup_cors;
