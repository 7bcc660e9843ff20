//! Mapping of failures to HTTP status codes and the `ApiResponse` envelope

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

/// Handler-level error
#[derive(Debug)]
pub enum ApiError {
    /// Query string or path could not be parsed into the expected types
    Binding(String),
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Binding(_) => StatusCode::BAD_REQUEST,
            Self::Domain(DomainError::InvalidSortField(_)) => StatusCode::BAD_REQUEST,
            Self::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Domain(DomainError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Domain(DomainError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Binding(msg) => msg,
            Self::Domain(e) => {
                if !e.is_client_error() {
                    error!(error = %e, "request failed");
                }
                e.to_string()
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
