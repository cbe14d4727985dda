use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::types::Pagination;

/// Wrapper for API responses that automatically adds the success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
    pub meta: Option<Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None,
            meta: None,
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
            meta: None,
        }
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    /// Create a paginated list response with a `meta` block alongside `data`
    pub fn paginated(data: T, total: i64, pagination: Pagination) -> Self {
        Self {
            data,
            status_code: None,
            meta: Some(json!({
                "total": total,
                "limit": pagination.limit_or_default(),
                "offset": pagination.offset_or_zero(),
            })),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Failed to serialize response data"
                    })),
                )
                    .into_response();
            }
        };

        let mut envelope = json!({
            "success": true,
            "data": data_value
        });

        if let Some(meta) = self.meta {
            envelope["meta"] = meta;
        }

        (status, Json(envelope)).into_response()
    }
}

/// Handler return type: success envelope or an [`ApiError`](crate::error::ApiError)
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_meta_carries_window() {
        let response = ApiResponse::paginated(vec![1, 2, 3], 42, Pagination::new(Some(10), Some(20)));
        let meta = response.meta.expect("paginated responses have meta");
        assert_eq!(meta["total"], 42);
        assert_eq!(meta["limit"], 10);
        assert_eq!(meta["offset"], 20);
    }

    #[test]
    fn plain_success_has_no_meta() {
        let response = ApiResponse::success(json!({"ok": true}));
        assert!(response.meta.is_none());
        assert!(response.status_code.is_none());
    }

    #[test]
    fn created_sets_201() {
        let response = ApiResponse::created(json!({}));
        assert_eq!(response.status_code, Some(StatusCode::CREATED));
    }
}
