// ABOUTME: Liveness endpoint for load balancers and deployment checks
// ABOUTME: Unauthenticated and does not touch the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

use super::ApiResponse;
use axum::Json;
use serde_json::{json, Value};

/// GET /health
pub async fn health_check() -> Json<ApiResponse<Value>> {
    ApiResponse::success(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
