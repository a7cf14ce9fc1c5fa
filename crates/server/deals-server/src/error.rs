//! Error-to-response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use deals_auth_core::AuthError;
use deals_identity_session::SessionError;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Request-level failures. Responses carry a fixed-shape minimal body;
/// anything more specific stays in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Not found")]
    NotFound,

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Auth(AuthError::Unauthenticated) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized access")
            }
            ApiError::Auth(AuthError::Forbidden) => (StatusCode::FORBIDDEN, "Forbidden access"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::Upstream(detail) => {
                tracing::error!(detail = %detail, "upstream collaborator failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
