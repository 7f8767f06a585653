//! Utility API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateUtilityRequest, UtilityDto};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};

/// Utility handler state
#[derive(Clone)]
pub struct UtilityHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/utilities",
    tag = "Utilities",
    params(PaginationParams),
    responses(
        (status = 200, description = "Utility list", body = PaginatedResponse<UtilityDto>)
    )
)]
pub async fn list_utilities(
    State(state): State<UtilityHandlerState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<UtilityDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.utilities().find_all().await {
        Ok(utilities) => {
            let items: Vec<UtilityDto> = utilities.into_iter().map(UtilityDto::from).collect();
            Ok(Json(PaginatedResponse::paginate(items, &pagination)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/utilities/{id}",
    tag = "Utilities",
    params(("id" = i32, Path, description = "Utility ID")),
    responses(
        (status = 200, description = "Utility details", body = ApiResponse<UtilityDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_utility(
    State(state): State<UtilityHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UtilityDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.utilities().find_by_id(id).await {
        Ok(Some(utility)) => Ok(Json(ApiResponse::success(UtilityDto::from(utility)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Utility {} not found", id))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/utilities",
    tag = "Utilities",
    request_body = CreateUtilityRequest,
    responses(
        (status = 201, description = "Utility created", body = ApiResponse<UtilityDto>),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_utility(
    State(state): State<UtilityHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUtilityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UtilityDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .repos
        .utilities()
        .create(request.name, request.unit)
        .await
    {
        Ok(utility) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(UtilityDto::from(utility))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/utilities/{id}",
    tag = "Utilities",
    params(("id" = i32, Path, description = "Utility ID")),
    responses(
        (status = 200, description = "Utility deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_utility(
    State(state): State<UtilityHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.utilities().delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(format!(
            "Utility {} deleted",
            id
        )))),
        Err(e) => Err(error_response(e)),
    }
}
