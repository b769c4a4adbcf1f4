// HTTP error mapping for the REST API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::auth::AuthError;

/// Error type returned by API handlers.
///
/// Each variant maps to one HTTP status and a JSON body, so handlers can
/// bail with `?` and still produce a consistent wire shape. Internal
/// detail is logged server-side and never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with a caller-facing message.
    BadRequest(String),
    /// 401 with a caller-facing message.
    Unauthorized(String),
    /// 404 with a caller-facing message.
    NotFound(String),
    /// 422 with the list of failed input checks.
    Validation(Vec<String>),
    /// 500. The detail is logged, the client sees a generic message.
    Internal(String),
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::NotFound(message) => write!(f, "{message}"),
            ApiError::Validation(errors) => {
                write!(f, "Validation failed: {}", errors.join(" "))
            }
            ApiError::Internal(detail) => write!(f, "Internal error: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::NotFound(message) => json!({ "error": message }),
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Internal error while handling request");
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // Token problems reject the request before it reaches a handler
            AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::UnknownPrincipal => ApiError::Unauthorized(err.to_string()),
            // Bad credentials and ownership denials share the 400 the
            // login and profile routes have always answered with
            AuthError::BadCredentials | AuthError::PermissionDenied => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::TokenCreation(detail) | AuthError::DatabaseError(detail) => {
                ApiError::Internal(detail)
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
