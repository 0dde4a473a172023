// ABOUTME: Main library entry point for the Backoffice admin backend
// ABOUTME: Provides admin authentication, session lifecycle, and user directory management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

#![deny(unsafe_code)]

//! # Backoffice
//!
//! An administrative backend with admin authentication and CRUD over a user
//! directory, fronted by an HTTP API.
//!
//! The heart of the system is the credential and session lifecycle: bcrypt
//! password hashing, short-lived HS256 access tokens paired with longer-lived
//! refresh tokens persisted in storage, and the invalidation rules around
//! them. Everything else (routing, CORS, pagination) is plumbing around that
//! core.
//!
//! ## Architecture
//!
//! - **`password`**: one-way salted password hashing and verification
//! - **`auth`**: stateless JWT issuance and validation
//! - **`services`**: transport-agnostic business logic (sessions, directory)
//! - **`database_plugins`**: storage abstraction with SQLite and PostgreSQL backends
//! - **`routes`** / **`middleware`**: the axum HTTP boundary
//!
//! ## Example
//!
//! ```rust,no_run
//! use backoffice::config::environment::ServerConfig;
//! use backoffice::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Backoffice configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT token issuance and validation
pub mod auth;

/// Environment-based configuration management
pub mod config;

/// Database abstraction layer with plugin support
pub mod database_plugins;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// HTTP middleware for bearer authentication and CORS
pub mod middleware;

/// Domain data models
pub mod models;

/// Password hashing and verification
pub mod password;

/// HTTP route handlers
pub mod routes;

/// Transport-agnostic business services
pub mod services;
