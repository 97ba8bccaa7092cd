//! Report DTOs
//!
//! Wire names keep the Spanish field names used by the HTML forms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateReportDto, Report};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDto {
    pub id: i32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    /// `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
}

impl From<Report> for ReportDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            title: report.title,
            description: report.description,
            date: report.date,
        }
    }
}

/// `POST /crear` form body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportRequest {
    #[serde(rename = "titulo")]
    #[validate(length(min = 1, message = "titulo is required"))]
    pub title: String,
    #[serde(rename = "descripcion")]
    #[validate(length(min = 1, message = "descripcion is required"))]
    pub description: String,
    /// `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    #[validate(length(min = 1, message = "fecha is required"))]
    pub date: String,
}

impl From<CreateReportRequest> for CreateReportDto {
    fn from(req: CreateReportRequest) -> Self {
        CreateReportDto::new(req.title, req.description, req.date)
    }
}
