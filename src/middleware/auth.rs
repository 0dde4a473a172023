// ABOUTME: Bearer token authentication middleware for protected routes
// ABOUTME: Validates the JWT and attaches the admin identity to the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

use crate::errors::AppError;
use crate::routes::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Identity extracted from a validated access token
///
/// Inserted into request extensions by [`require_auth`] so handlers can read
/// it with `Extension<AuthenticatedAdmin>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub admin_id: Uuid,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Reject requests without a valid `Authorization: Bearer <jwt>` header
///
/// # Errors
///
/// Returns `Unauthorized` for a missing or malformed header, and the token
/// manager's `InvalidToken`/`ExpiredToken` for a bad JWT.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("missing authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("authorization header must use the Bearer scheme"))?;

    let claims = state.token_manager.validate_token(token)?;
    let admin = AuthenticatedAdmin {
        admin_id: claims.admin_id()?,
        email: claims.email.clone(),
        role: claims.role.clone(),
    };

    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}
