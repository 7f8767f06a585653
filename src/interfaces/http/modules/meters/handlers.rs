//! Meter API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateMeterRequest, MeterDto, MeterFilter};
use crate::domain::meter::NewMeter;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};

/// Meter handler state
#[derive(Clone)]
pub struct MeterHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/meters",
    tag = "Meters",
    params(MeterFilter, PaginationParams),
    responses(
        (status = 200, description = "Meter list", body = PaginatedResponse<MeterDto>)
    )
)]
pub async fn list_meters(
    State(state): State<MeterHandlerState>,
    Query(filter): Query<MeterFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<MeterDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let found = match filter.user_id {
        Some(user_id) => state.repos.meters().find_by_user(user_id).await,
        None => state.repos.meters().find_all().await,
    };
    match found {
        Ok(meters) => {
            let items: Vec<MeterDto> = meters.into_iter().map(MeterDto::from).collect();
            Ok(Json(PaginatedResponse::paginate(items, &pagination)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/meters/{id}",
    tag = "Meters",
    params(("id" = i32, Path, description = "Meter ID")),
    responses(
        (status = 200, description = "Meter details", body = ApiResponse<MeterDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_meter(
    State(state): State<MeterHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MeterDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.meters().find_by_id(id).await {
        Ok(Some(meter)) => Ok(Json(ApiResponse::success(MeterDto::from(meter)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Meter {} not found", id))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/meters",
    tag = "Meters",
    request_body = CreateMeterRequest,
    responses(
        (status = 201, description = "Meter registered", body = ApiResponse<MeterDto>),
        (status = 400, description = "Referenced user or utility does not exist"),
        (status = 409, description = "Serial number already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_meter(
    State(state): State<MeterHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateMeterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MeterDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    let new = NewMeter {
        serial_no: request.serial_no,
        user_id: request.user_id,
        utility_id: request.utility_id,
    };
    match state.repos.meters().create(new).await {
        Ok(meter) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(MeterDto::from(meter))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/meters/{id}",
    tag = "Meters",
    params(("id" = i32, Path, description = "Meter ID")),
    responses(
        (status = 200, description = "Meter deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_meter(
    State(state): State<MeterHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.meters().delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(format!("Meter {} deleted", id)))),
        Err(e) => Err(error_response(e)),
    }
}
