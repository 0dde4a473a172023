// ABOUTME: HTTP route assembly, shared application state and response envelope
// ABOUTME: Mounts auth and user-directory endpoints under /api/v1
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

pub mod auth;
pub mod health;
pub mod users;

use crate::auth::TokenManager;
use crate::database_plugins::factory::Database;
use crate::middleware::{require_auth, setup_cors};
use crate::services::{AuthService, UserService};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub token_manager: Arc<TokenManager>,
}

impl AppState {
    #[must_use]
    pub fn new(
        database: Database,
        token_manager: Arc<TokenManager>,
        password_hasher: crate::password::PasswordHasher,
    ) -> Self {
        Self {
            auth_service: AuthService::new(
                database.clone(),
                token_manager.clone(),
                password_hasher,
            ),
            user_service: UserService::new(database),
            token_manager,
        }
    }
}

/// Success envelope wrapping every 2xx response body
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> axum::Json<Self> {
        axum::Json(Self {
            success: true,
            data,
        })
    }
}

/// Build the complete application router
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let public_auth = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/auth", public_auth)
        .nest("/api/v1", protected)
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(cors_origins))
        .with_state(state)
}
