use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

pub fn ok_json<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse>) {
    match serde_json::to_value(data) {
        Ok(value) => (
            StatusCode::OK,
            Json(ApiResponse { success: true, data: Some(value), error: None }),
        ),
        Err(e) => error_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Response serialization failed: {}", e),
        ),
    }
}

pub fn error_json(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    (
        status,
        Json(ApiResponse { success: false, data: None, error: Some(message.into()) }),
    )
}

/// Wallet and admin-gate denials share one opaque response; the caller is
/// not told which check failed.
pub fn denied() -> (StatusCode, Json<ApiResponse>) {
    error_json(StatusCode::FORBIDDEN, "access denied")
}

/// A chain transaction that did not land. The chain layer already discarded
/// the underlying error, so there is no detail to forward.
pub fn chain_failed() -> (StatusCode, Json<ApiResponse>) {
    error_json(StatusCode::BAD_GATEWAY, "chain transaction failed")
}
