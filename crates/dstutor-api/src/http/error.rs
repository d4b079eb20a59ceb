//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use dstutor_types::error::TurnError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A turn failed: bad input or upstream model failure.
    Turn(TurnError),
    /// Unknown session.
    NotFound(String),
    /// Malformed request (e.g. an unparseable session id).
    Validation(String),
}

impl From<TurnError> for AppError {
    fn from(e: TurnError) -> Self {
        AppError::Turn(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Turn(TurnError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Turn(TurnError::Upstream(e)) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ApiResponse::error(code, &message, Uuid::now_v7().to_string(), 0);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use dstutor_types::llm::LlmError;

    #[test]
    fn test_status_mapping() {
        let validation = AppError::from(TurnError::Validation("empty".into()));
        assert_eq!(validation.parts().0, StatusCode::BAD_REQUEST);

        let upstream = AppError::from(TurnError::Upstream(LlmError::Timeout(Duration::from_secs(60))));
        let (status, code, message) = upstream.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "UPSTREAM_ERROR");
        assert_eq!(message, "request timed out after 60s");

        assert_eq!(
            AppError::NotFound("gone".into()).parts().0,
            StatusCode::NOT_FOUND
        );
    }
}
