/// Server error types
use crate::services::accounts::AccountError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use larder_storage::StorageError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unable to authenticate with provided credentials")]
    InvalidCredentials,

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Database error: {0}")]
    Storage(#[from] StorageError),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Unauthorized(msg) => (StatusCode::FORBIDDEN, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            // The token endpoint contract: failed issuance is a validation
            // failure, not a challenge, so 400 rather than 401.
            ServerError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                "Unable to authenticate with provided credentials".to_string(),
            ),
            ServerError::Account(ref err) => match err {
                AccountError::InvalidEmail(_)
                | AccountError::PasswordTooShort(_)
                | AccountError::EmailTaken(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                AccountError::Storage(e) => {
                    tracing::error!("Account storage error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error".to_string(),
                    )
                }
                AccountError::Hash(e) => {
                    tracing::error!("Password hashing error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Password error".to_string(),
                    )
                }
            },
            ServerError::Storage(err) => match err {
                StorageError::Duplicate(msg) => (StatusCode::BAD_REQUEST, msg),
                StorageError::NotFound { entity, id } => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found: {id}"))
                }
                other => {
                    tracing::error!("Database error: {:?}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error".to_string(),
                    )
                }
            },
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::error!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
