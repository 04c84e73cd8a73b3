//! Error types for the API service
//!
//! `AuthError` is the auth-flow taxonomy; `ApiError` is the HTTP-facing
//! wrapper that maps every failure to a status code and a JSON body. The
//! response for a failed login never reveals whether the identifier or
//! the password was wrong.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::password::PasswordError;
use crate::repositories::StoreError;

/// Failures of the registration and login flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an already-registered email
    #[error("user already exists")]
    DuplicateUser,

    /// Unknown identifier or wrong password at login
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Credential store failure
    #[error("credential store unavailable")]
    Store(#[source] StoreError),

    /// Password hashing failure
    #[error(transparent)]
    Hashing(#[from] PasswordError),

    /// Token issuance failure
    #[error("token issuance failed")]
    Token(#[source] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => AuthError::DuplicateUser,
            other => AuthError::Store(other),
        }
    }
}

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Auth flow failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Auth(AuthError::DuplicateUser) => {
                (StatusCode::BAD_REQUEST, "User already exists".to_string())
            }
            ApiError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::BAD_REQUEST, "Invalid credentials".to_string())
            }
            ApiError::Auth(e) => {
                error!("Auth flow failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
