//! Validated form extractor for Axum
//!
//! `ValidatedForm<T>` works like `axum::Form<T>` and then runs
//! `validator::Validate::validate()` on the result. Failures are answered in
//! the standard `ApiResponse` envelope.

use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::dto::ApiResponse;
use crate::domain::DomainError;

/// Extracts an `application/x-www-form-urlencoded` body and validates it.
///
/// ```ignore
/// async fn handler(ValidatedForm(body): ValidatedForm<LoginRequest>) {
///     // `body` passed validation
/// }
/// ```
pub struct ValidatedForm<T>(pub T);

pub enum ValidatedFormRejection {
    /// Body missing, wrong content type, or a field absent.
    Form(FormRejection),
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidatedFormRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Form(rejection) => {
                let body = ApiResponse::<()>::error(format!("Invalid form: {}", rejection.body_text()));
                (rejection.status(), Json(body)).into_response()
            }
            Self::Validation(errors) => {
                let message = DomainError::from(errors).to_string();
                let body = ApiResponse::<()>::error(message);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedFormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(ValidatedFormRejection::Form)?;

        value
            .validate()
            .map_err(ValidatedFormRejection::Validation)?;

        Ok(ValidatedForm(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
