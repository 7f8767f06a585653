//! Payment API handlers
//!
//! `settle_payment` is the HTTP face of the settlement engine; the other
//! handlers are plain reads plus the administrative removal.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::domain::DomainError;

use super::dto::{PaymentDto, PaymentFilter, SettlePaymentRequest, SettlementDto};
use crate::application::SettlementService;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, PaginationParams,
};

/// Payment handler state
#[derive(Clone)]
pub struct PaymentHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub settlement: Arc<SettlementService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    request_body = SettlePaymentRequest,
    responses(
        (status = 200, description = "Bill settled", body = ApiResponse<SettlementDto>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Bill not found"),
        (status = 409, description = "Already paid or duplicate reference"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn settle_payment(
    State(state): State<PaymentHandlerState>,
    payload: Result<Json<SettlePaymentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SettlementDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    // The settlement contract fixes 400 for every malformed input, so body
    // rejections (missing field, wrong type, bad JSON) fold into Validation
    // instead of the extractor's default 422.
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return Err(error_response(DomainError::Validation(format!(
                "invalid request body: {}",
                rejection.body_text()
            ))));
        }
    };
    match state
        .settlement
        .settle_payment(
            request.bill_id,
            &request.payment_method,
            request.transaction_ref.as_deref(),
        )
        .await
    {
        Ok(receipt) => {
            info!(
                "Payment {} recorded for bill {}",
                receipt.payment_id, receipt.bill_id
            );
            Ok(Json(ApiResponse::success(SettlementDto::from(receipt))))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "Payments",
    params(PaymentFilter, PaginationParams),
    responses(
        (status = 200, description = "Payment list", body = PaginatedResponse<PaymentDto>)
    )
)]
pub async fn list_payments(
    State(state): State<PaymentHandlerState>,
    Query(filter): Query<PaymentFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<PaymentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let found = match filter.bill_id {
        Some(bill_id) => state
            .repos
            .payments()
            .find_by_bill(bill_id)
            .await
            .map(|p| p.into_iter().collect()),
        None => state.repos.payments().find_all().await,
    };
    match found {
        Ok(payments) => {
            let items: Vec<PaymentDto> = payments.into_iter().map(PaymentDto::from).collect();
            Ok(Json(PaginatedResponse::paginate(items, &pagination)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_payment(
    State(state): State<PaymentHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PaymentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.payments().find_by_id(id).await {
        Ok(Some(payment)) => Ok(Json(ApiResponse::success(PaymentDto::from(payment)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Payment {} not found", id))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment removed; the bill stays paid", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_payment(
    State(state): State<PaymentHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.payments().delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(format!(
            "Payment {} removed",
            id
        )))),
        Err(e) => Err(error_response(e)),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set,
    };
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::entities::{bill, meter, user, utility};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    async fn setup_state() -> (PaymentHandlerState, DatabaseConnection) {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.expect("connect");
        Migrator::up(&db, None).await.expect("migrate");

        let state = PaymentHandlerState {
            repos: Arc::new(SeaOrmRepositoryProvider::new(db.clone())),
            settlement: Arc::new(SettlementService::new(db.clone())),
        };
        (state, db)
    }

    async fn seed_unpaid_bill(db: &DatabaseConnection) -> i32 {
        let owner = user::ActiveModel {
            full_name: Set("Grace Hopper".to_string()),
            email: Set("grace@example.com".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let water = utility::ActiveModel {
            name: Set("water".to_string()),
            unit: Set("m3".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let m = meter::ActiveModel {
            serial_no: Set("MTR-100".to_string()),
            user_id: Set(owner.id),
            utility_id: Set(water.id),
            installed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        bill::ActiveModel {
            meter_id: Set(m.id),
            period: Set("2026-07".to_string()),
            amount: Set("450.00".parse::<Decimal>().unwrap()),
            due_date: Set(NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()),
            status: Set("unpaid".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    fn app(state: PaymentHandlerState) -> Router {
        Router::new()
            .route("/api/v1/payments", post(settle_payment))
            .with_state(state)
    }

    async fn post_settlement(
        state: PaymentHandlerState,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        use tower::Service;
        let mut svc = app(state).into_service();
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/payments")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn settle_returns_200_with_receipt() {
        let (state, db) = setup_state().await;
        let bill_id = seed_unpaid_bill(&db).await;

        let (status, body) = post_settlement(
            state,
            serde_json::json!({
                "bill_id": bill_id,
                "payment_method": "card",
                "transaction_ref": "TXN-001"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["bill_id"], bill_id);
        assert_eq!(body["data"]["bill_status"], "paid");
        assert!(body["data"]["payment_id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn settling_twice_returns_409() {
        let (state, db) = setup_state().await;
        let bill_id = seed_unpaid_bill(&db).await;

        let (first, _) = post_settlement(
            state.clone(),
            serde_json::json!({"bill_id": bill_id, "payment_method": "card"}),
        )
        .await;
        assert_eq!(first, StatusCode::OK);

        let (second, body) = post_settlement(
            state,
            serde_json::json!({"bill_id": bill_id, "payment_method": "card"}),
        )
        .await;
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_bill_returns_404() {
        let (state, _db) = setup_state().await;

        let (status, _) = post_settlement(
            state,
            serde_json::json!({"bill_id": 12345, "payment_method": "card"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_field_returns_400() {
        let (state, db) = setup_state().await;
        let bill_id = seed_unpaid_bill(&db).await;

        let (status, body) =
            post_settlement(state, serde_json::json!({"bill_id": bill_id})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn wrongly_typed_field_returns_400() {
        let (state, _db) = setup_state().await;

        let (status, _) = post_settlement(
            state,
            serde_json::json!({"bill_id": "seven", "payment_method": "card"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_method_returns_400() {
        let (state, db) = setup_state().await;
        let bill_id = seed_unpaid_bill(&db).await;

        let (status, _) = post_settlement(
            state,
            serde_json::json!({"bill_id": bill_id, "payment_method": "  "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
