//! Application error type.
//!
//! Every fallible handler, service and store method returns [`AppError`]. It
//! carries the HTTP status to respond with and the underlying
//! [`anyhow::Error`]; the response body is always `{"error": "<message>"}`.
//!
//! Any error convertible into `anyhow::Error` turns into a 500 through `?`,
//! so store and hashing failures propagate unchanged unless a caller maps
//! them explicitly.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: self.error.to_string(),
        });

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_not_found_status() {
        let err = AppError::not_found(anyhow!("User not found"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error.to_string(), "User not found");
    }

    #[test]
    fn test_question_mark_conversion_is_internal() {
        fn fails() -> Result<(), AppError> {
            let _: u32 = "nope".parse()?;
            Ok(())
        }

        let err = fails().unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = AppError::bad_request(anyhow!("email is invalid")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: "User not found".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "User not found" }));
    }
}
