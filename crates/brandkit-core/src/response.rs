use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ErrorDetail;

/// JSON envelope shared by every brandkit endpoint.
///
/// ```json
/// { "success": true, "data": { "hashtags": ["#Glad", "#happy"] } }
/// { "success": false, "error": { "code": "NOT_FOUND", "message": "..." } }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(detail: ErrorDetail) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(detail),
        }
    }

    /// Send the envelope with an explicit status code.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, axum::Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        self.with_status(status)
    }
}

/// A successful envelope sent with `201 Created`.
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        ApiResponse::success(self.0).with_status(StatusCode::CREATED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_omits_error() {
        let json = serde_json::to_value(ApiResponse::success(vec!["#cat"])).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": ["#cat"] }));
    }

    #[test]
    fn test_created_status() {
        let response = Created(serde_json::json!({ "id": 1 })).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
