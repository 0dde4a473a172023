// ABOUTME: HTTP handlers for the user directory CRUD endpoints
// ABOUTME: Translates query strings and JSON bodies into UserService calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

use super::{ApiResponse, AppState};
use crate::database_plugins::{SortOrder, UserListQuery, UserUpdate};
use crate::errors::AppResult;
use crate::models::DirectoryUserView;
use crate::services::users::{NewUser, UserPage};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Query string for GET /api/v1/users
///
/// `status` and `role` accept comma-separated lists, e.g. `status=active,banned`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListUsersParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl From<ListUsersParams> for UserListQuery {
    fn from(params: ListUsersParams) -> Self {
        Self {
            page: params.page.unwrap_or(1),
            limit: params.limit.unwrap_or(0),
            search: params.search.filter(|s| !s.trim().is_empty()),
            statuses: split_csv(params.status.as_deref()),
            roles: split_csv(params.role.as_deref()),
            sort: params.sort,
            order: match params.order.as_deref() {
                Some("asc" | "ASC") => SortOrder::Asc,
                _ => SortOrder::Desc,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Body for PUT /api/v1/users/:id
///
/// A missing `phone` leaves the number alone while an explicit `null` clears
/// it, hence the nested Option.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    pub role: Option<String>,
    pub status: Option<String>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> AppResult<Json<ApiResponse<UserPage>>> {
    let page = state.user_service.list_users(params.into()).await?;

    Ok(ApiResponse::success(page))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DirectoryUserView>>)> {
    let user = state
        .user_service
        .create_user(NewUser {
            email: request.email,
            name: request.name,
            phone: request.phone,
            role: request.role,
            status: request.status,
        })
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::success(user)))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DirectoryUserView>>> {
    let user = state.user_service.get_user(id).await?;

    Ok(ApiResponse::success(user))
}

/// PUT /api/v1/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<DirectoryUserView>>> {
    let update = UserUpdate {
        name: request.name,
        phone: request.phone,
        role: request.role,
        status: request.status,
    };
    let user = state.user_service.update_user(id, update).await?;

    Ok(ApiResponse::success(user))
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DeleteResponse>>> {
    state.user_service.delete_user(id).await?;

    Ok(ApiResponse::success(DeleteResponse {
        message: "user deleted",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_split_comma_separated_filters() {
        let params = ListUsersParams {
            status: Some("active, banned".to_string()),
            role: Some("admin".to_string()),
            order: Some("asc".to_string()),
            ..Default::default()
        };

        let query = UserListQuery::from(params);
        assert_eq!(query.statuses, vec!["active", "banned"]);
        assert_eq!(query.roles, vec!["admin"]);
        assert_eq!(query.order, SortOrder::Asc);
    }

    #[test]
    fn update_request_distinguishes_missing_phone_from_null() {
        let missing: UpdateUserRequest = serde_json::from_str(r#"{"name":"New"}"#).unwrap();
        assert_eq!(missing.phone, None);

        let cleared: UpdateUserRequest = serde_json::from_str(r#"{"phone":null}"#).unwrap();
        assert_eq!(cleared.phone, Some(None));

        let set: UpdateUserRequest = serde_json::from_str(r#"{"phone":"+123"}"#).unwrap();
        assert_eq!(set.phone, Some(Some("+123".to_string())));
    }
}
