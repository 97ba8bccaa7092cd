//! Report handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html, Extension, Json};

use crate::api::dto::{ApiResponse, CreateReportRequest, ReportDto};
use crate::api::middleware::CurrentUser;
use crate::api::pages::CREATE_REPORT_PAGE;
use crate::api::validated_form::ValidatedForm;
use crate::application::ReportService;
use crate::domain::DomainError;

/// List all reports
///
/// Every logged-in user sees every report, oldest first.
#[utoipa::path(
    get,
    path = "/",
    tag = "Reports",
    responses(
        (status = 200, description = "All reports", body = ApiResponse<Vec<ReportDto>>),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_reports(
    State(reports): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportDto>>>, DomainError> {
    let items = reports
        .list_reports()
        .await?
        .into_iter()
        .map(ReportDto::from)
        .collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Report creation form
#[utoipa::path(
    get,
    path = "/crear",
    tag = "Reports",
    responses(
        (status = 200, description = "HTML creation form", body = String, content_type = "text/html"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Role may not create reports")
    )
)]
pub async fn create_page() -> Html<&'static str> {
    Html(CREATE_REPORT_PAGE)
}

/// Create a report
///
/// Restricted to administrators and peritos.
#[utoipa::path(
    post,
    path = "/crear",
    tag = "Reports",
    request_body(content = CreateReportRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportDto>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Role may not create reports"),
        (status = 422, description = "Empty field or invalid date")
    )
)]
pub async fn create_report(
    State(reports): State<Arc<ReportService>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidatedForm(request): ValidatedForm<CreateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReportDto>>), DomainError> {
    let report = reports.create_report(&user, request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReportDto::from(report))),
    ))
}
