//! Bill API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{BillDto, BillFilter, CreateBillRequest};
use crate::domain::bill::NewBill;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};

/// Bill handler state
#[derive(Clone)]
pub struct BillHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/bills",
    tag = "Bills",
    params(BillFilter, PaginationParams),
    responses(
        (status = 200, description = "Bill list", body = PaginatedResponse<BillDto>)
    )
)]
pub async fn list_bills(
    State(state): State<BillHandlerState>,
    Query(filter): Query<BillFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<BillDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let found = match filter.meter_id {
        Some(meter_id) => state.repos.bills().find_by_meter(meter_id).await,
        None => state.repos.bills().find_all().await,
    };
    match found {
        Ok(bills) => {
            let items: Vec<BillDto> = bills
                .into_iter()
                .filter(|b| match filter.status {
                    Some(ref status) => status.eq_ignore_ascii_case(b.status.as_str()),
                    None => true,
                })
                .map(BillDto::from)
                .collect();
            Ok(Json(PaginatedResponse::paginate(items, &pagination)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/{id}",
    tag = "Bills",
    params(("id" = i32, Path, description = "Bill ID")),
    responses(
        (status = 200, description = "Bill details", body = ApiResponse<BillDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_bill(
    State(state): State<BillHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BillDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.bills().find_by_id(id).await {
        Ok(Some(bill)) => Ok(Json(ApiResponse::success(BillDto::from(bill)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Bill {} not found", id))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/bills",
    tag = "Bills",
    request_body = CreateBillRequest,
    responses(
        (status = 201, description = "Bill issued", body = ApiResponse<BillDto>),
        (status = 400, description = "Negative amount or unknown meter"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_bill(
    State(state): State<BillHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateBillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BillDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    let new = NewBill {
        meter_id: request.meter_id,
        period: request.period,
        amount: request.amount,
        due_date: request.due_date,
    };
    match state.repos.bills().create(new).await {
        Ok(bill) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(BillDto::from(bill))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/bills/{id}",
    tag = "Bills",
    params(("id" = i32, Path, description = "Bill ID")),
    responses(
        (status = 200, description = "Bill deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_bill(
    State(state): State<BillHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.bills().delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(format!("Bill {} deleted", id)))),
        Err(e) => Err(error_response(e)),
    }
}
