//! HTTP mapping of domain errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::dto::ApiResponse;
use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::InvalidCredentials | DomainError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // storage details are logged where they occur, not sent to clients
        let message = match self {
            DomainError::Storage(_) => "Internal server error".to_string(),
            DomainError::InvalidCredentials => "Invalid credentials".to_string(),
            DomainError::Unauthenticated(msg)
            | DomainError::Forbidden(msg)
            | DomainError::Validation(msg)
            | DomainError::Conflict(msg) => msg,
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
