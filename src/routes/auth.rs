// ABOUTME: HTTP handlers for admin registration, login, token refresh and logout
// ABOUTME: Thin layer translating JSON bodies into AuthService calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

use super::{ApiResponse, AppState};
use crate::errors::AppResult;
use crate::middleware::AuthenticatedAdmin;
use crate::models::AdminView;
use crate::services::auth::SessionTokens;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SessionTokens>>)> {
    let tokens = state
        .auth_service
        .register(&request.email, &request.password, &request.name)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::success(tokens)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<SessionTokens>>> {
    let tokens = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(ApiResponse::success(tokens))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<RefreshResponse>>> {
    let access_token = state
        .auth_service
        .refresh_token(&request.refresh_token)
        .await?;

    Ok(ApiResponse::success(RefreshResponse { access_token }))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<LogoutResponse>>> {
    state.auth_service.logout(&request.refresh_token).await?;

    Ok(ApiResponse::success(LogoutResponse {
        message: "logged out",
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
) -> AppResult<Json<ApiResponse<AdminView>>> {
    let view = state.auth_service.get_current_admin(admin.admin_id).await?;

    Ok(ApiResponse::success(view))
}
