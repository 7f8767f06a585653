//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::SettlementService;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::interfaces::http::modules::{bills, health, meters, payments, users, utilities};

use crate::interfaces::http::modules::bills::{dto::BillDto, handlers::BillHandlerState};
use crate::interfaces::http::modules::meters::{dto::MeterDto, handlers::MeterHandlerState};
use crate::interfaces::http::modules::payments::{
    dto::{PaymentDto, SettlementDto},
    handlers::PaymentHandlerState,
};
use crate::interfaces::http::modules::users::{dto::UserDto, handlers::UserHandlerState};
use crate::interfaces::http::modules::utilities::{dto::UtilityDto, handlers::UtilityHandlerState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Users
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::create_user,
        users::handlers::delete_user,
        // Utilities
        utilities::handlers::list_utilities,
        utilities::handlers::get_utility,
        utilities::handlers::create_utility,
        utilities::handlers::delete_utility,
        // Meters
        meters::handlers::list_meters,
        meters::handlers::get_meter,
        meters::handlers::create_meter,
        meters::handlers::delete_meter,
        // Bills
        bills::handlers::list_bills,
        bills::handlers::get_bill,
        bills::handlers::create_bill,
        bills::handlers::delete_bill,
        // Payments
        payments::handlers::settle_payment,
        payments::handlers::list_payments,
        payments::handlers::get_payment,
        payments::handlers::delete_payment,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginationParams,
            PaginatedResponse<UserDto>,
            PaginatedResponse<BillDto>,
            // Health
            health::handlers::HealthResponse,
            // Users
            UserDto,
            users::dto::CreateUserRequest,
            // Utilities
            UtilityDto,
            utilities::dto::CreateUtilityRequest,
            // Meters
            MeterDto,
            meters::dto::CreateMeterRequest,
            // Bills
            BillDto,
            bills::dto::CreateBillRequest,
            // Payments
            PaymentDto,
            SettlementDto,
            payments::dto::SettlePaymentRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Users", description = "Account holder management"),
        (name = "Utilities", description = "Utility service catalog (electricity, water, gas)"),
        (name = "Meters", description = "Meter registration, linking users to utilities"),
        (name = "Bills", description = "Bill issuance and lookup per meter and period"),
        (name = "Payments", description = "Payment settlement: records a payment and marks its bill paid in one transaction"),
    ),
    info(
        title = "Utility Billing Administration API",
        version = "1.0.0",
        description = "REST API for managing utility accounts, meters, bills and payment settlement",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    settlement: Arc<SettlementService>,
) -> Router {
    let user_state = UserHandlerState {
        repos: repos.clone(),
    };
    let utility_state = UtilityHandlerState {
        repos: repos.clone(),
    };
    let meter_state = MeterHandlerState {
        repos: repos.clone(),
    };
    let bill_state = BillHandlerState {
        repos: repos.clone(),
    };
    let payment_state = PaymentHandlerState { repos, settlement };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route(
            "/",
            get(users::handlers::list_users).post(users::handlers::create_user),
        )
        .route(
            "/{id}",
            get(users::handlers::get_user).delete(users::handlers::delete_user),
        )
        .with_state(user_state);

    let utility_routes = Router::new()
        .route(
            "/",
            get(utilities::handlers::list_utilities).post(utilities::handlers::create_utility),
        )
        .route(
            "/{id}",
            get(utilities::handlers::get_utility).delete(utilities::handlers::delete_utility),
        )
        .with_state(utility_state);

    let meter_routes = Router::new()
        .route(
            "/",
            get(meters::handlers::list_meters).post(meters::handlers::create_meter),
        )
        .route(
            "/{id}",
            get(meters::handlers::get_meter).delete(meters::handlers::delete_meter),
        )
        .with_state(meter_state);

    let bill_routes = Router::new()
        .route(
            "/",
            get(bills::handlers::list_bills).post(bills::handlers::create_bill),
        )
        .route(
            "/{id}",
            get(bills::handlers::get_bill).delete(bills::handlers::delete_bill),
        )
        .with_state(bill_state);

    // POST / here is the settlement endpoint, not a plain insert
    let payment_routes = Router::new()
        .route(
            "/",
            get(payments::handlers::list_payments).post(payments::handlers::settle_payment),
        )
        .route(
            "/{id}",
            get(payments::handlers::get_payment).delete(payments::handlers::delete_payment),
        )
        .with_state(payment_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::handlers::health_check))
        // Resources
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/utilities", utility_routes)
        .nest("/api/v1/meters", meter_routes)
        .nest("/api/v1/bills", bill_routes)
        .nest("/api/v1/payments", payment_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;
    use tower::Service;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    async fn test_router() -> Router {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.expect("connect");
        Migrator::up(&db, None).await.expect("migrate");

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let settlement = Arc::new(SettlementService::new(db));
        create_api_router(repos, settlement)
    }

    #[tokio::test]
    async fn health_endpoint_responds_ok() {
        let mut svc = test_router().await.into_service();
        let resp = svc
            .call(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_user_is_404() {
        let mut svc = test_router().await.into_service();
        let resp = svc
            .call(
                Request::builder()
                    .uri("/api/v1/users/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_user_list_is_ok() {
        let mut svc = test_router().await.into_service();
        let resp = svc
            .call(
                Request::builder()
                    .uri("/api/v1/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
