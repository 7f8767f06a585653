//! Common API DTOs and error mapping

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard response envelope.
///
/// Every REST endpoint returns data in this wrapper.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload. `null` on error
    pub data: Option<T>,
    /// Error description. `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination query parameters for list endpoints
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationParams {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1-100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

/// Paginated response with a data slice and page metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total item count across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Slice a full result set down to one page
    pub fn paginate(all: Vec<T>, params: &PaginationParams) -> Self {
        let total = all.len() as u64;
        let page = params.page.max(1);
        let limit = params.limit.clamp(1, 100);
        // usize arithmetic: u32 would overflow on a hostile page number
        let start = (page as usize - 1) * limit as usize;
        let items: Vec<T> = all.into_iter().skip(start).take(limit as usize).collect();
        Self::new(items, total, page, limit)
    }
}

/// Fixed status-code mapping for the error taxonomy
pub fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the standard error reply.
///
/// Internal details go to the log; clients get a generic message.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = error_status(&err);
    let message = match &err {
        DomainError::Internal(detail) => {
            tracing::error!("Internal error: {}", detail);
            "internal server error".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_fixed_status_codes() {
        assert_eq!(
            error_status(&DomainError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DomainError::not_found("Bill", "id", 7)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DomainError::Conflict("already paid".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&DomainError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let (_, body) = error_response::<()>(DomainError::Internal("connection refused".into()));
        assert_eq!(body.0.error.as_deref(), Some("internal server error"));
    }

    #[test]
    fn paginate_slices_and_counts() {
        let params = PaginationParams { page: 2, limit: 3 };
        let page = PaginatedResponse::paginate((1..=8).collect::<Vec<_>>(), &params);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total, 8);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn paginate_survives_maximum_page_number() {
        let params = PaginationParams {
            page: u32::MAX,
            limit: 100,
        };
        let page = PaginatedResponse::paginate((1..=8).collect::<Vec<_>>(), &params);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 8);
        assert_eq!(page.page, u32::MAX);
    }
}
