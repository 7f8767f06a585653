//! User API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateUserRequest, UserDto};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(PaginationParams),
    responses(
        (status = 200, description = "User list", body = PaginatedResponse<UserDto>)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<UserDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.users().find_all().await {
        Ok(users) => {
            let items: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
            Ok(Json(PaginatedResponse::paginate(items, &pagination)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.users().find_by_id(id).await {
        Ok(Some(user)) => Ok(Json(ApiResponse::success(UserDto::from(user)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("User {} not found", id))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .repos
        .users()
        .create(request.full_name, request.email)
        .await
    {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(UserDto::from(user))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.users().delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(format!("User {} deleted", id)))),
        Err(e) => Err(error_response(e)),
    }
}
