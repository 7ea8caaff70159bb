//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use common::error::DatabaseError;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Required request fields are missing or malformed
    #[error("{0}")]
    Validation(String),

    /// An identifier does not match the store's identifier scheme
    #[error("{0}")]
    InvalidId(String),

    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// No token presented on a protected route
    #[error("Access denied. Token not provided")]
    MissingToken,

    /// Token signature or expiry check failed
    #[error("Invalid token")]
    InvalidToken,

    /// Password comparison failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Database error
    #[error("Database error: {0}")]
    Database(DatabaseError),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidIdentifier(id) => ApiError::InvalidId(format!("Invalid ID: {}", id)),
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(msg) | ApiError::InvalidId(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Access denied. Token not provided".to_string(),
            ),
            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::Database(_) | ApiError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (
                ApiError::Validation("All fields are required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidId("Invalid movie ID".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::NotFound("Movie not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::MissingToken, StatusCode::UNAUTHORIZED),
            (ApiError::InvalidToken, StatusCode::UNAUTHORIZED),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                ApiError::InternalServerError,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotFound("Movie not found".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body, json!({ "error": "Movie not found" }));
    }

    #[test]
    fn test_invalid_identifier_maps_to_bad_request() {
        let error: ApiError = DatabaseError::InvalidIdentifier("abc".to_string()).into();
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_query_error_maps_to_server_error() {
        let error: ApiError = DatabaseError::Query(sqlx::Error::RowNotFound).into();
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
