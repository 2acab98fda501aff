use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::database::StoreError;
use crate::utils::{error_codes, error_to_api_response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("rate limit exceeded, resets at {reset_at}")]
    RateLimitExceeded { remaining: u32, reset_at: String },

    #[error("backing store unavailable: {0}")]
    BackingStoreUnavailable(String),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => AppError::BackingStoreUnavailable(msg),
            StoreError::Other(msg) => AppError::Internal(msg),
        }
    }
}

#[derive(Serialize)]
struct RateLimitBody {
    remaining: u32,
    reset_at: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                "未授权访问".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                error_codes::PERMISSION_DENIED,
                "权限不足".to_string(),
            ),
            AppError::RateLimitExceeded {
                remaining,
                reset_at,
            } => {
                let body = crate::result::ApiResponse {
                    code: error_codes::RATE_LIMIT,
                    msg: format!("请求过于频繁，请在{}后重试", reset_at),
                    resp_data: Some(RateLimitBody {
                        remaining: *remaining,
                        reset_at: reset_at.clone(),
                    }),
                };
                return (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
            }
            AppError::BackingStoreUnavailable(detail) => {
                tracing::error!("Backing store unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    error_codes::STORE_UNAVAILABLE,
                    "数据库不可用".to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "内部服务器错误".to_string(),
                )
            }
        };

        (status, error_to_api_response::<()>(code, message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (
                AppError::RateLimitExceeded {
                    remaining: 0,
                    reset_at: "2026-01-01T00:00:00Z".into(),
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AppError::BackingStoreUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn store_error_becomes_backing_store_unavailable() {
        let err: AppError = StoreError::Unavailable("connection refused".into()).into();
        assert!(matches!(
            err,
            AppError::BackingStoreUnavailable(msg) if msg == "connection refused"
        ));
    }

    #[test]
    fn other_store_errors_are_internal() {
        let err: AppError = StoreError::Other("no column named role".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
