use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::{AppError, ErrorCode, error_response};

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    AppError::NotFound("The requested resource was not found".to_string()).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_response()
}

/// Rewrites the bare 408 from the timeout layer into the JSON error envelope.
pub async fn request_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!(
            error_code = ErrorCode::RequestTimeout.code(),
            "Request timed out"
        );
        return error_response(
            StatusCode::REQUEST_TIMEOUT,
            ErrorCode::RequestTimeout.default_message().to_string(),
            None,
            ErrorCode::RequestTimeout,
        );
    }
    response
}
