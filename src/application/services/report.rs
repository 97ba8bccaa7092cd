//! Report business logic service

use std::sync::Arc;

use tracing::info;

use crate::auth::require_role;
use crate::domain::{
    CreateReportDto, DomainResult, Report, ReportRepositoryInterface, Role, User,
};

/// Service for report listing and authoring
pub struct ReportService {
    repo: Arc<dyn ReportRepositoryInterface>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepositoryInterface>) -> Self {
        Self { repo }
    }

    /// All reports, oldest first. Visible to every role.
    pub async fn list_reports(&self) -> DomainResult<Vec<Report>> {
        self.repo.list_reports().await
    }

    /// Create a report on behalf of `author`.
    ///
    /// The role check runs before any field is looked at, so a supervisor
    /// gets `Forbidden` even for an invalid submission.
    pub async fn create_report(&self, author: &User, dto: CreateReportDto) -> DomainResult<Report> {
        require_role(author, &Role::REPORT_AUTHORS)?;

        let new_report = dto.into_new_report()?;
        let report = self.repo.create_report(new_report).await?;

        metrics::counter!("reports_created_total").increment(1);
        info!(
            report_id = report.id,
            author = %author.username,
            "Report created"
        );

        Ok(report)
    }
}

// ── Tests ──────────────────────────────────────────────────────
